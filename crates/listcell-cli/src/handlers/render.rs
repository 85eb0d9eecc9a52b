use super::{block_on, build_client, finish, read_request};
use anyhow::Result;
use std::path::Path;

pub fn handle(config_path: Option<&str>, input: Option<&Path>, compact: bool) -> Result<()> {
    let loaded = read_request(input)?;
    let client = build_client(config_path, loaded.properties)?;

    let payload = block_on(client.render_request(&loaded.request))??;
    finish(&client);

    let json = if compact {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    println!("{}", json);
    Ok(())
}
