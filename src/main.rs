use kumite::application_impl::GuardState;
use kumite::application_port::*;
use kumite::client::Client;
use kumite::logger::*;
use kumite::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap();

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let client = Client::try_new(&project_settings).await?;

    match cli.command {
        Command::Login { username, password } => {
            client
                .auth_api
                .login(LoginInput { username, password })
                .await?;
            let user = client.auth_api.me().await?;
            client.session.set_user(user.clone()).await;
            println!("signed in as {}", user.display_name());
        }
        Command::Whoami => match client.bootstrap().check().await {
            GuardState::Authenticated => {
                if let Some(user) = client.session.current_user().await {
                    println!("{} ({})", user.display_name(), user.username);
                }
            }
            _ => println!("not signed in"),
        },
        Command::Logout => {
            client.session.logout().await;
            println!("signed out");
        }
    }

    Ok(())
}
