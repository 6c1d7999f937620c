use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use csv::ReaderBuilder;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use permgate_core::{authenticate, resolve_permissions, Sheet};
use permgate_sheets::{SheetsClient, SourceConfig, TabSelector};

#[derive(Parser, Debug)]
#[command(
    name = "permgate",
    version,
    about = "Dashboard credential and permission checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Tabs {
        #[arg(value_parser = ["user", "permission"])]
        sheet: String,
    },
    Login {
        username: String,
        password: String,
    },
    Permissions {
        username: String,
    },
    Check {
        #[arg(long)]
        users: PathBuf,
        #[arg(long)]
        perms: PathBuf,
        username: String,
        password: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Tabs { sheet } => run_tabs(&sheet),
        Commands::Login { username, password } => run_login(&username, &password),
        Commands::Permissions { username } => run_permissions(&username),
        Commands::Check {
            users,
            perms,
            username,
            password,
        } => run_check(&users, &perms, &username, &password),
    }
}

fn run_tabs(sheet: &str) -> Result<()> {
    let client = SheetsClient::from_env()?;
    let sources = SourceConfig::from_env()?;
    let spreadsheet_id = match sheet {
        "user" => &sources.user_sheet_id,
        "permission" => &sources.permission_sheet_id,
        other => bail!("unknown sheet {other}"),
    };
    let tabs = client.list_tabs_blocking(spreadsheet_id)?;
    for tab in tabs {
        println!("{}\t{}", tab.index, tab.title);
    }
    Ok(())
}

fn run_login(username: &str, password: &str) -> Result<()> {
    let client = SheetsClient::from_env()?;
    let sources = SourceConfig::from_env()?;
    let users = client.open_table_blocking(&sources.user_sheet_id, &sources.user_tab)?;
    let envelope = match authenticate(&users, username, password) {
        Some(identity) => {
            let grants = open_permission_table(&client, &sources)?;
            login_envelope(identity, &grants)
        }
        None => json!({ "success": false, "message": "invalid username or password" }),
    };
    print_json(&envelope)
}

fn run_permissions(username: &str) -> Result<()> {
    let client = SheetsClient::from_env()?;
    let sources = SourceConfig::from_env()?;
    let grants = open_permission_table(&client, &sources)?;
    let permissions = resolve_permissions(&grants, username);
    print_json(&serde_json::to_value(&permissions)?)
}

fn run_check(users: &Path, perms: &Path, username: &str, password: &str) -> Result<()> {
    let users = load_csv_sheet(users)?;
    let grants = load_csv_sheet(perms)?;
    let envelope = match authenticate(&users, username, password) {
        Some(identity) => login_envelope(identity, &grants),
        None => json!({ "success": false, "message": "invalid username or password" }),
    };
    print_json(&envelope)
}

fn open_permission_table(client: &SheetsClient, sources: &SourceConfig) -> Result<Sheet> {
    Ok(client.open_table_blocking(&sources.permission_sheet_id, &sources.permission_tab)?)
}

fn login_envelope(identity: &str, grants: &Sheet) -> Value {
    let permissions = resolve_permissions(grants, identity);
    json!({
        "success": true,
        "username": identity,
        "permissions": permissions,
    })
}

fn load_csv_sheet(path: &Path) -> Result<Sheet> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut reader = ReaderBuilder::new().from_reader(file);
    let headers = reader
        .headers()
        .with_context(|| format!("missing headers in {}", path.display()))?
        .iter()
        .map(|cell| cell.to_string())
        .collect::<Vec<_>>();
    let mut grid = vec![headers];
    for record in reader.records() {
        let record = record.with_context(|| format!("invalid row in {}", path.display()))?;
        grid.push(record.iter().map(|cell| cell.to_string()).collect());
    }
    Ok(Sheet::from_grid(grid))
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn users_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Cost_center,password").unwrap();
        writeln!(file, "cc001,secret1").unwrap();
        writeln!(file, "cc002,secret2").unwrap();
        file
    }

    fn perms_csv() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Cost_center,c1,c2,c3").unwrap();
        writeln!(file, "cc001,admin,1MS,OPH BKK1").unwrap();
        file
    }

    #[test]
    fn csv_export_loads_as_sheet() {
        let file = users_csv();
        let sheet = load_csv_sheet(file.path()).unwrap();
        assert_eq!(sheet.headers(), ["Cost_center", "password"]);
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[1].get("password"), Some("secret2"));
    }

    #[test]
    fn offline_check_matches_live_flow() {
        let users = load_csv_sheet(users_csv().path()).unwrap();
        let grants = load_csv_sheet(perms_csv().path()).unwrap();
        let identity = authenticate(&users, "CC001", "secret1").unwrap();
        let envelope = login_envelope(identity, &grants);
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["username"], "cc001");
        assert_eq!(envelope["permissions"]["showAdmin"], true);
        assert_eq!(envelope["permissions"]["levelUp"][0], "1MS");
        assert_eq!(envelope["permissions"]["sm"][0], "OPH BKK1");
    }

    #[test]
    fn offline_check_rejects_bad_secret() {
        let users = load_csv_sheet(users_csv().path()).unwrap();
        assert!(authenticate(&users, "cc001", "SECRET1").is_none());
    }
}
