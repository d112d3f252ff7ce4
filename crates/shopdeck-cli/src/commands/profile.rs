//! User profile subcommands.
//!
//! The profile lives in memory for the session; there is no remote endpoint
//! for it, so `edit` prints the profile as it stands after the submit.

use anyhow::Result;
use clap::Subcommand;

use shopdeck_application::ProfileUseCase;
use shopdeck_core::profile::{Profile, ProfileStats, SocialLinks};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the active profile
    Show,
    /// Edit profile fields as name=value pairs (`social.twitter` addresses a
    /// nested field)
    Edit {
        #[arg(value_parser = parse_field, required = true)]
        fields: Vec<(String, String)>,
    },
}

fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// The demo account the dashboard session starts with.
fn seed_profile() -> Profile {
    Profile {
        id: 1,
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        role: "Product Manager".to_string(),
        department: "Marketing".to_string(),
        location: "New York, NY".to_string(),
        bio: "Experienced product manager with a passion for creating user-friendly solutions."
            .to_string(),
        join_date: "January 2022".to_string(),
        avatar: "https://randomuser.me/api/portraits/men/32.jpg".to_string(),
        social: SocialLinks {
            twitter: "johndoe".to_string(),
            linkedin: "john-doe".to_string(),
            github: "johndoe".to_string(),
        },
        stats: ProfileStats {
            products: 42,
            followers: 128,
            following: 86,
        },
    }
}

pub async fn run(action: ProfileAction) -> Result<()> {
    let usecase = ProfileUseCase::new(seed_profile());

    match action {
        ProfileAction::Show => {
            println!("{}", serde_json::to_string_pretty(&usecase.profile().await)?);
        }
        ProfileAction::Edit { fields } => {
            usecase.open_edit().await?;
            for (name, value) in &fields {
                usecase.set_field(name, value).await?;
            }
            let updated = usecase.submit().await?;
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
    }

    Ok(())
}
