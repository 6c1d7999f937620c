use crate::normalize::fold_key;
use crate::table::Sheet;

pub fn authenticate<'a>(sheet: &'a Sheet, identity: &str, secret: &str) -> Option<&'a str> {
    let identity_col = sheet.headers().first()?;
    let secret_col = sheet.headers().get(1)?;
    let wanted_identity = fold_key(identity);
    let wanted_secret = secret.trim();
    sheet.rows().iter().find_map(|row| {
        let stored_identity = row.get(identity_col).unwrap_or("");
        let stored_secret = row.get(secret_col).unwrap_or("");
        let matched = fold_key(stored_identity) == wanted_identity
            && stored_secret.trim() == wanted_secret;
        matched.then(|| stored_identity.trim())
    })
}
