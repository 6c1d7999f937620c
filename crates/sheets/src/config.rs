use std::env;

use crate::error::{Result, SheetsError};

pub const DEFAULT_USER_TAB: &str = "ข้อมูลusername & password";
pub const DEFAULT_PERMISSION_TAB: &str = "permissionDashboard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabSelector {
    Title(String),
    Index(usize),
}

impl TabSelector {
    // an all-digit value selects by position, anything else by title
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.parse::<usize>() {
            Ok(index) => TabSelector::Index(index),
            Err(_) => TabSelector::Title(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub user_sheet_id: String,
    pub user_tab: TabSelector,
    pub permission_sheet_id: String,
    pub permission_tab: TabSelector,
}

impl SourceConfig {
    pub fn from_env() -> Result<Self> {
        let user_sheet_id = require_env("USER_SHEET_ID")?;
        let permission_sheet_id = require_env("PERMISSION_SHEET_ID")?;
        let user_tab = env::var("USER_SHEET_TAB")
            .map(|value| TabSelector::parse(&value))
            .unwrap_or_else(|_| TabSelector::Title(DEFAULT_USER_TAB.to_string()));
        let permission_tab = env::var("PERMISSION_SHEET_TAB")
            .map(|value| TabSelector::parse(&value))
            .unwrap_or_else(|_| TabSelector::Title(DEFAULT_PERMISSION_TAB.to_string()));
        Ok(Self {
            user_sheet_id,
            user_tab,
            permission_sheet_id,
            permission_tab,
        })
    }
}

fn require_env(name: &'static str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SheetsError::MissingEnv(name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_select_by_position() {
        assert_eq!(TabSelector::parse("0"), TabSelector::Index(0));
        assert_eq!(TabSelector::parse(" 2 "), TabSelector::Index(2));
    }

    #[test]
    fn anything_else_selects_by_title() {
        assert_eq!(
            TabSelector::parse("permissionDashboard"),
            TabSelector::Title("permissionDashboard".to_string())
        );
        assert_eq!(
            TabSelector::parse(" Sheet 1 "),
            TabSelector::Title("Sheet 1".to_string())
        );
        assert_eq!(
            TabSelector::parse(DEFAULT_USER_TAB),
            TabSelector::Title(DEFAULT_USER_TAB.to_string())
        );
    }
}
