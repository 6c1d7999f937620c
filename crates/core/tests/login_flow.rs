use permgate_core::{authenticate, resolve_permissions, Sheet};

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn credential_sheet() -> Sheet {
    Sheet::from_grid(grid(&[
        &["Cost_center", "password", "note"],
        &["cc001", "secret1", "ward A"],
        &["cc002", "secret2", ""],
    ]))
}

fn permission_sheet() -> Sheet {
    Sheet::from_grid(grid(&[
        &["Cost_center", "p1", "p2", "p3", "p4"],
        &["cc001", "admin", "1MS", "", "OPH BKK1"],
        &["cc002", "free text", "", "", ""],
    ]))
}

#[test]
fn login_then_resolve() {
    let users = credential_sheet();
    let permissions = permission_sheet();

    let identity = authenticate(&users, "CC001", "secret1").expect("login should succeed");
    assert_eq!(identity, "cc001");

    let resolved = resolve_permissions(&permissions, identity);
    assert!(resolved.show_admin);
    assert!(!resolved.show_trb);
    assert!(!resolved.show_nsm);
    assert_eq!(resolved.level_up, ["1MS"]);
    assert_eq!(resolved.sm, ["OPH BKK1"]);
}

#[test]
fn response_envelope_shape() {
    let users = credential_sheet();
    let permissions = permission_sheet();

    let identity = authenticate(&users, "CC001", "secret1").unwrap();
    let resolved = resolve_permissions(&permissions, identity);
    let envelope = serde_json::json!({
        "success": true,
        "username": identity,
        "permissions": resolved,
    });
    assert_eq!(envelope["username"], "cc001");
    assert_eq!(envelope["permissions"]["showAdmin"], true);
    assert_eq!(envelope["permissions"]["levelUp"][0], "1MS");
}

#[test]
fn rejected_login_never_reaches_permissions() {
    let users = credential_sheet();
    assert!(authenticate(&users, "cc001", "wrong").is_none());
    assert!(authenticate(&users, "unknown", "secret1").is_none());
}

#[test]
fn verified_identity_without_permission_row_gets_defaults() {
    let users = credential_sheet();
    let permissions = Sheet::from_grid(grid(&[
        &["Cost_center", "p1"],
        &["cc999", "admin"],
    ]));
    let identity = authenticate(&users, "cc002", "secret2").unwrap();
    let resolved = resolve_permissions(&permissions, identity);
    assert_eq!(resolved, permgate_core::PermissionSet::default());
}

#[test]
fn unrecognized_tokens_leave_counts_unchanged() {
    let permissions = permission_sheet();
    let resolved = resolve_permissions(&permissions, "cc002");
    assert_eq!(resolved, permgate_core::PermissionSet::default());
}
