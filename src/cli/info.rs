//! `trl info` command

use anyhow::Result;
use colored::Colorize;

use super::utils::connect;
use super::ConnectionArgs;

pub fn run(connection: &ConnectionArgs) -> Result<()> {
    let (client, _) = connect(connection)?;

    let info = client.get_app_info()?;
    let instance = client.get_instance_name()?;

    println!("{}", "Server".bold());
    println!("{}", "═".repeat(40));
    if let Some(object) = info.as_object() {
        for (key, value) in object {
            let rendered = match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            };
            println!("{:<16} {}", format!("{}:", key), rendered);
        }
    } else {
        println!("{}", info);
    }
    if let Some(name) = instance {
        println!("{:<16} {}", "instance:", name.cyan());
    }

    Ok(())
}
