use serde::{Deserialize, Serialize};

use crate::normalize::fold_key;
use crate::table::Sheet;
use crate::vocab;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionSet {
    #[serde(rename = "showTRB")]
    pub show_trb: bool,
    #[serde(rename = "showNSM")]
    pub show_nsm: bool,
    pub show_admin: bool,
    pub level_up: Vec<String>,
    pub sm: Vec<String>,
}

impl PermissionSet {
    // one classification per cell; the first rule that fires wins
    fn grant(&mut self, token: &str) {
        match token.to_lowercase().as_str() {
            "trb" => self.show_trb = true,
            "nsm" => self.show_nsm = true,
            "admin" => self.show_admin = true,
            _ if vocab::is_level_up(token) => self.level_up.push(token.to_string()),
            _ if vocab::is_sm_unit(token) => self.sm.push(token.to_string()),
            _ => {}
        }
    }
}

pub fn resolve_permissions(sheet: &Sheet, identity: &str) -> PermissionSet {
    let mut permissions = PermissionSet::default();
    let identity_col = match sheet.headers().first() {
        Some(header) => header,
        None => return permissions,
    };
    let wanted = fold_key(identity);
    let row = sheet
        .rows()
        .iter()
        .find(|row| fold_key(row.get(identity_col).unwrap_or("")) == wanted);
    let row = match row {
        Some(row) => row,
        None => return permissions,
    };
    for header in &sheet.headers()[1..] {
        let token = row.get(header).unwrap_or("").trim();
        if token.is_empty() {
            continue;
        }
        permissions.grant(token);
    }
    permissions
}
