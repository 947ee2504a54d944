use fbgraph::{Client, ClientConfig, Params};
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let token = env::var("FB_GRAPH_TOKEN").expect("FB_GRAPH_TOKEN is required");
    let message = env::args()
        .nth(1)
        .unwrap_or_else(|| "hello from fbgraph".to_string());

    let client = Client::new(ClientConfig::new(token))?;

    let response = client.put_message("me", message, Params::new(), None).await?;
    println!("created: {response:?}");

    Ok(())
}
