use dealdesk_client::ApiClient;

use super::print_json;
use crate::Result;
use crate::cli::UserCommand;

pub async fn users(client: &ApiClient, cmd: UserCommand) -> Result<()> {
    let users = client.users();
    match cmd {
        UserCommand::List { page, email } => print_json(&users.list(page, email.as_deref()).await?),
        UserCommand::Suspend { id } => print_json(&users.suspend(id).await?),
        UserCommand::Reactivate { id } => print_json(&users.reactivate(id).await?),
        UserCommand::Delete { id } => print_json(&users.delete(id).await?),
    }
}
