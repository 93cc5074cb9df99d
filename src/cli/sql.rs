//! `trl sql` command

use anyhow::Result;
use clap::Args;
use serde_json::Value;

use super::utils::connect;
use super::ConnectionArgs;

#[derive(Args, Debug)]
pub struct SqlArgs {
    /// Query, with `?` placeholders
    pub query: String,

    /// Placeholder values, in order (sent as strings)
    #[arg(short, long = "param")]
    pub params: Vec<String>,
}

pub fn run(args: SqlArgs, connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;

    let params: Vec<Value> = args.params.into_iter().map(Value::String).collect();
    let rows = client.sql().get_rows(&args.query, &params)?;

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
