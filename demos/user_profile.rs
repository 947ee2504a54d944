use fbgraph::{Client, ClientConfig};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = env::var("FB_GRAPH_TOKEN").expect("FB_GRAPH_TOKEN is required");

    let config = ClientConfig::new(token);
    let client = Client::new(config)?;

    let profile = client.get_user_info(None, None).await?;
    println!("profile: {profile}");

    let picture = client.get_user_picture_url(None).await?;
    println!("picture: {picture}");

    let permissions = client.get_token_granted_permissions().await?;
    println!("granted: {permissions:?}");

    Ok(())
}
