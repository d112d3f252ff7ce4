//! Product catalog subcommands.

use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;

use shopdeck_application::CatalogUseCase;
use shopdeck_core::catalog::ProductId;
use shopdeck_infrastructure::{ConfigService, RestProductRepository};

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List the catalog
    List,
    /// Show a single product
    Show { id: String },
    /// Add a product
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        image: Option<String>,
    },
    /// Update fields of an existing product
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Remove { id: String },
}

fn build_usecase() -> CatalogUseCase {
    let config = ConfigService::new().get_config();
    let repository = Arc::new(RestProductRepository::new(&config));
    CatalogUseCase::new(repository)
}

pub async fn run(action: ProductsAction) -> Result<()> {
    let usecase = build_usecase();

    match action {
        ProductsAction::List => {
            usecase.load_all().await?;
            println!("{}", serde_json::to_string_pretty(&usecase.products().await)?);
        }
        ProductsAction::Show { id } => {
            let product = usecase.load_one(&ProductId::from(id.as_str())).await?;
            println!("{}", serde_json::to_string_pretty(&product)?);
        }
        ProductsAction::Add {
            title,
            price,
            description,
            category,
            image,
        } => {
            usecase.open_form(None).await?;
            usecase.set_form_field("title", &title).await?;
            usecase.set_form_field("price", &price).await?;
            usecase.set_form_field("description", &description).await?;
            usecase.set_form_field("category", &category).await?;
            if let Some(image) = image {
                usecase.set_form_field("image", &image).await?;
            }
            let created = usecase.submit_form().await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        ProductsAction::Update {
            id,
            title,
            price,
            description,
            category,
            image,
        } => {
            let id = ProductId::from(id.as_str());
            // Seed the form from the current remote record so unspecified
            // fields keep their values.
            usecase.load_one(&id).await?;
            usecase.open_form(Some(&id)).await?;
            let edits = [
                ("title", title),
                ("price", price),
                ("description", description),
                ("category", category),
                ("image", image),
            ];
            for (field, value) in edits {
                if let Some(value) = value {
                    usecase.set_form_field(field, &value).await?;
                }
            }
            let updated = usecase.submit_form().await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        ProductsAction::Remove { id } => {
            let record_id = ProductId::from(id.as_str());
            usecase.delete(&record_id).await?;
            println!("deleted product {id}");
        }
    }

    Ok(())
}
