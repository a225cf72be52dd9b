//! Create-admin command - Bootstraps an administrator account.
//!
//! Administrators are not created through the admission form, so they
//! carry no admission documents or profile beyond a name.

use std::sync::Arc;

use crate::cli::args::CreateAdminArgs;
use crate::config::Config;
use crate::domain::{NewUser, Profile, UserRole};
use crate::errors::AppResult;
use crate::infra::{Database, FsStore, Persistence};
use crate::services::{UserManager, UserService};

/// Execute the create-admin command
pub async fn execute(args: CreateAdminArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await;
    let storage = Arc::new(FsStore::new(&config));

    let uow = Arc::new(Persistence::new(db.get_connection()));
    let user_service = UserManager::new(uow, storage);

    let admin = user_service
        .create_user(
            NewUser {
                username: args.username,
                email: args.email,
                password: args.password,
                role: UserRole::Admin,
                profile: Profile {
                    first_name: args.first_name,
                    last_name: args.last_name,
                    ..Profile::default()
                },
            },
            None,
        )
        .await?;

    tracing::info!(admin_id = %admin.id, username = %admin.username, "administrator created");
    println!("Administrator '{}' created ({})", admin.username, admin.id);

    Ok(())
}
