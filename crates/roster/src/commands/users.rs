//! User command handlers: `list` and `add`.

use std::sync::Arc;

use tabled::Tabled;

use roster_config::Config;
use roster_core::{Directory, SortOrder, User, UserDraft, ViewQuery};

use crate::cli::{AddArgs, GlobalOpts, ListArgs};
use crate::error::CliError;
use crate::{config, output};

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl From<&Arc<User>> for UserRow {
    fn from(u: &Arc<User>) -> Self {
        Self {
            name: u.name.clone(),
            email: u.email.clone(),
            username: u.username.clone(),
            id: u.id.to_string(),
        }
    }
}

fn detail(u: &Arc<User>) -> String {
    [
        format!("ID:       {}", u.id),
        format!("Name:     {}", u.name),
        format!("Username: {}", u.username),
        format!("Email:    {}", u.email),
    ]
    .join("\n")
}

/// Resolve the query from flags, falling back to config defaults.
fn build_query(args: &ListArgs, cfg: &Config) -> ViewQuery {
    let sort_order = if args.desc {
        SortOrder::Descending
    } else if args.asc {
        SortOrder::Ascending
    } else {
        cfg.defaults.sort_order
    };

    ViewQuery::new(
        args.search.clone().unwrap_or_default(),
        args.sort.unwrap_or(cfg.defaults.sort_field),
        sort_order,
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(
    directory: &Directory,
    args: &ListArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    directory.load().await?;

    let query = build_query(args, cfg);
    tracing::debug!(?query, "deriving view");
    let view = directory.view(&query);

    let out = output::render_list(
        config::output_format(global, cfg),
        &view,
        |u| UserRow::from(u),
        |u| u.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn add(
    directory: &Directory,
    args: AddArgs,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let draft = UserDraft::new(args.name, args.username, args.email);
    let created = directory.add(&draft).await?;

    let out = output::render_single(
        config::output_format(global, cfg),
        &created,
        detail,
        |u| u.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);

    if !global.quiet {
        let color = output::should_color(config::color_mode(global, cfg));
        eprintln!(
            "{}",
            output::success_line(&format!("Added user {}", created.id), color)
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use roster_core::SortField;

    use super::*;
    use crate::cli::{Cli, Command};

    fn list_args(args: &[&str]) -> ListArgs {
        let mut argv = vec!["roster", "list"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::List(args) => args,
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn query_defaults_come_from_config() {
        let mut cfg = Config::default();
        cfg.defaults.sort_field = SortField::Email;
        cfg.defaults.sort_order = SortOrder::Descending;

        let query = build_query(&list_args(&[]), &cfg);
        assert_eq!(
            query,
            ViewQuery::new("", SortField::Email, SortOrder::Descending)
        );

        let query = build_query(&list_args(&["--asc", "--sort", "id", "-s", "ali"]), &cfg);
        assert_eq!(query, ViewQuery::new("ali", SortField::Id, SortOrder::Ascending));
    }

    #[test]
    fn desc_and_asc_conflict() {
        assert!(Cli::try_parse_from(["roster", "list", "--asc", "--desc"]).is_err());
    }

    #[test]
    fn row_columns_follow_table_order() {
        let user = Arc::new(User::new(1, "Alice", "alice1", "a@x.com"));
        let row = UserRow::from(&user);
        assert_eq!(row.name, "Alice");
        assert_eq!(row.id, "1");
        assert!(detail(&user).contains("Username: alice1"));
    }
}
