use super::{block_on, build_client, finish, read_request};
use anyhow::Result;
use std::path::Path;

pub fn handle(config_path: Option<&str>, input: Option<&Path>) -> Result<()> {
    let loaded = read_request(input)?;
    let client = build_client(config_path, loaded.properties)?;

    let request = &loaded.request;
    let field = request.field();
    let row = request.row_data();
    let text = block_on(client.cell_text(&request.value, field.as_ref(), &row, &request.page))?;
    finish(&client);

    println!("{}", text);
    Ok(())
}
