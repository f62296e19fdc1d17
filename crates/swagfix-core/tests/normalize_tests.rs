use swagfix_core::normalize::{AREA_SEPARATOR, normalize};
use swagfix_core::{document, fixup_str};

const MOBILE_CENTER: &str = include_str!("fixtures/mobile-center.json");

fn operation_id<'a>(
    doc: &'a swagfix_core::SwaggerDocument,
    path: &str,
    method: &str,
) -> Option<&'a str> {
    doc.paths
        .get(path)
        .and_then(|item| item.operation(method))
        .and_then(|op| op.operation_id.as_deref())
}

#[test]
fn spec_examples_snapshot() {
    let input = r#"{
        "swagger": "2.0",
        "paths": {
            "/apps/{app}/devices": {"GET": {}},
            "/empty": {},
            "/account": {
                "get": {"tags": ["account"], "operationId": "list_devices"},
                "post": {"operationId": "account_list"}
            }
        }
    }"#;
    let (output, report) = fixup_str(input).unwrap();
    assert_eq!(report.removed_paths, 1);
    assert_eq!(report.renamed_operations, 1);
    insta::assert_snapshot!(output, @r#"
    {
      "swagger": "2.0",
      "paths": {
        "/apps/{app}/devices": {
          "GET": {
            "operationId": "misc_GETAppsByAppDevices"
          }
        },
        "/account": {
          "get": {
            "tags": [
              "account"
            ],
            "operationId": "list_devices"
          },
          "post": {
            "operationId": "account_list"
          }
        }
      }
    }
    "#);
}

#[test]
fn fixture_operation_ids() {
    let mut doc = document::from_json(MOBILE_CENTER).expect("fixture should parse");
    let report = normalize(&mut doc);
    assert_eq!(report.removed_paths, 1);
    assert_eq!(report.renamed_operations, 4);

    assert_eq!(operation_id(&doc, "/v0.1/apps", "get"), Some("Apps_List"));
    assert_eq!(
        operation_id(&doc, "/v0.1/apps", "post"),
        Some("account_Create")
    );
    assert_eq!(
        operation_id(
            &doc,
            "/v0.1/apps/{owner_name}/{app_name}/distribution_groups",
            "get"
        ),
        Some("distribute_getV01AppsByOwnerNameByAppNameDistributionGroups")
    );
    assert_eq!(operation_id(&doc, "/v0.1/user", "get"), Some("misc_getUser"));
    assert_eq!(
        operation_id(&doc, "/v0.1/user", "patch"),
        Some("misc_patchV01User")
    );
    assert!(!doc.paths.contains_key("/v0.1/user/invitations"));
}

#[test]
fn fixture_keeps_unrelated_members() {
    let (output, _) = fixup_str(MOBILE_CENTER).unwrap();
    let before: serde_json::Value = serde_json::from_str(MOBILE_CENTER).unwrap();
    let after: serde_json::Value = serde_json::from_str(&output).unwrap();

    for key in ["swagger", "info", "host", "schemes", "definitions"] {
        assert_eq!(before[key], after[key], "member {key} changed");
    }
    let user = &after["paths"]["/v0.1/user"];
    assert_eq!(user["x-ms-summary"]["operationId"], "untouched");
    let groups = &after["paths"]["/v0.1/apps/{owner_name}/{app_name}/distribution_groups"];
    assert_eq!(
        groups["parameters"],
        before["paths"]["/v0.1/apps/{owner_name}/{app_name}/distribution_groups"]["parameters"]
    );

    let keys: Vec<&String> = after.as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["swagger", "info", "host", "schemes", "paths", "definitions"]
    );
}

#[test]
fn every_path_is_non_empty_and_every_id_has_area() {
    let mut doc = document::from_json(MOBILE_CENTER).unwrap();
    normalize(&mut doc);

    assert!(doc.paths.values().all(|item| !item.is_empty()));
    for (path, method, op) in doc.operations() {
        let id = op.operation_id.as_deref().unwrap_or_default();
        let (area, name) = id
            .split_once(AREA_SEPARATOR)
            .unwrap_or_else(|| panic!("{method} {path}: {id:?} has no area"));
        assert!(!area.is_empty(), "{method} {path}: empty area");
        assert!(!name.is_empty(), "{method} {path}: empty name");
    }
}

#[test]
fn null_path_item_is_removed() {
    let input = r#"{"paths": {"/gone": null, "/kept": {"get": {}}}}"#;
    let (output, report) = fixup_str(input).unwrap();
    assert_eq!(report.removed_paths, 1);
    assert_eq!(report.renamed_operations, 1);

    let fixed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(fixed["paths"].get("/gone").is_none());
    assert_eq!(fixed["paths"]["/kept"]["get"]["operationId"], "misc_getKept");
}

#[test]
fn area_without_name_is_prefixed_once() {
    let input = r#"{"paths": {"/apps": {"get": {"tags": ["account"], "operationId": "account_"}}}}"#;
    let (once, report) = fixup_str(input).unwrap();
    assert_eq!(report.renamed_operations, 1);

    let fixed: serde_json::Value = serde_json::from_str(&once).unwrap();
    assert_eq!(fixed["paths"]["/apps"]["get"]["operationId"], "account_account_");

    let (twice, report) = fixup_str(&once).unwrap();
    assert!(report.is_unchanged());
    assert_eq!(once, twice);
}

#[test]
fn normalize_is_idempotent() {
    let (once, _) = fixup_str(MOBILE_CENTER).unwrap();
    let (twice, report) = fixup_str(&once).unwrap();
    assert!(report.is_unchanged());
    assert_eq!(once, twice);
}

#[test]
fn output_is_deterministic() {
    let (a, _) = fixup_str(MOBILE_CENTER).unwrap();
    let (b, _) = fixup_str(MOBILE_CENTER).unwrap();
    assert_eq!(a, b);
}

#[test]
fn invalid_json_fails() {
    assert!(fixup_str("not json").is_err());
    assert!(fixup_str(r#"{"paths": []}"#).is_err());
}
