use clap::Args;
use storefront_app::{
    auth::{NewUser, PgAuthService, UserUuid},
    database::Db,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateUserArgs {
    #[command(flatten)]
    database: DatabaseArgs,

    /// Login email, unique ignoring case
    #[arg(long)]
    email: String,

    /// Grant access to the admin routes
    #[arg(long)]
    admin: bool,
}

pub(crate) async fn run(args: CreateUserArgs) -> Result<(), String> {
    let pool = args.database.connect().await?;

    let service = PgAuthService::new(Db::new(pool));

    let issued = service
        .create_user(NewUser {
            uuid: UserUuid::new(),
            email: args.email,
            is_admin: args.admin,
        })
        .await
        .map_err(|error| format!("failed to create user: {error}"))?;

    println!("user_uuid: {}", issued.user.uuid);
    println!("user_email: {}", issued.user.email);
    println!("is_admin: {}", issued.user.is_admin);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
