//! Store settings commands.

use clap::Subcommand;
use shopdesk_admin::dialog::MutationDialog;
use shopdesk_admin::models::Settings;

use super::{CliError, Context, saved};
use crate::output;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show current settings
    Show,
    /// Set one or more fields, e.g. `currency=EUR logoUrl=https://...`
    Set {
        #[arg(required = true, value_parser = parse_assignment)]
        assignments: Vec<(String, String)>,
    },
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {raw}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in {raw}"));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn run(ctx: &mut Context, action: SettingsAction) -> Result<(), CliError> {
    let current = ctx.client.get_settings().await?;

    match action {
        SettingsAction::Show => print(&current),
        SettingsAction::Set { assignments } => {
            let mut dialog = MutationDialog::<Settings>::new();
            let form = dialog.open_edit(&current);
            for (key, value) in assignments {
                form.set(&key, value);
            }
            let updated = saved(dialog.submit(&ctx.client, &mut ctx.console).await)?;
            print(&updated);
        }
    }
    Ok(())
}

fn print(settings: &Settings) {
    let mut pairs = vec![("currency", settings.currency_code().to_string())];
    pairs.extend(
        settings
            .extra
            .iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(text) => (key.as_str(), text.clone()),
                other => (key.as_str(), other.to_string()),
            }),
    );
    output::details(&pairs);
    let images = settings.image_urls().count();
    if images > 0 {
        output::line(format!("({images} image fields)"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("currency=EUR"),
            Ok(("currency".to_string(), "EUR".to_string()))
        );
        assert_eq!(
            parse_assignment("bannerUrl=https://cdn.test/a.png?x=1"),
            Ok((
                "bannerUrl".to_string(),
                "https://cdn.test/a.png?x=1".to_string()
            ))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
