use pretty_assertions::assert_eq;
use test_discovery::discovery::{DeploymentItem, Trait};

use crate::fixtures::Workspace;

const TESTS: &str = r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
attributes:
  - {type: TestCategory, args: [nightly]}
types:
  - full_name: NS.Base
    attributes:
      - {type: TestCategory, args: [inherited]}
  - full_name: NS.Suite
    base_type: NS.Base
    attributes:
      - {type: TestClass}
      - {type: TestCategory, args: [[integration, nightly]]}
      - {type: TestProperty, args: [Area, storage]}
      - {type: DeploymentItem, args: [config.json]}
    methods:
      - name: Annotated
        attributes:
          - {type: TestMethod, args: ["writes a record"]}
          - {type: TestCategory, args: [fast, integration]}
          - {type: TestProperty, args: [Team, core]}
          - {type: Owner, args: [dana]}
          - {type: Priority, args: [2]}
          - {type: Description, args: ["Round-trips a record"]}
          - {type: WorkItem, args: [41]}
          - {type: WorkItem, args: [42]}
          - {type: CssIteration, args: ["vstfs:///Iteration/7"]}
          - {type: CssProjectStructure, args: ["vstfs:///Area/3"]}
          - {type: DeploymentItem, args: [data.csv, input]}
          - {type: DoNotParallelize}
      - name: Plain
        attributes: [{type: TestMethod}]
"#;

#[test]
fn test_descriptor_metadata() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");
    assert!(found.warnings.is_empty(), "{:?}", found.warnings);

    let test = found.find("NS.Suite.Annotated");
    assert_eq!(test.display_name, "writes a record");
    assert_eq!(
        test.categories,
        vec!["fast", "integration", "nightly", "inherited"]
    );
    assert_eq!(
        test.traits,
        vec![
            Trait::new("Team", "core"),
            Trait::new("Area", "storage"),
            Trait::new("Owner", "dana"),
            Trait::new("Priority", "2"),
        ]
    );
    assert_eq!(test.priority, Some(2));
    assert_eq!(test.description.as_deref(), Some("Round-trips a record"));
    assert_eq!(
        test.work_item_ids,
        Some(vec!["41".to_string(), "42".to_string()])
    );
    assert_eq!(test.css_iteration.as_deref(), Some("vstfs:///Iteration/7"));
    assert_eq!(test.css_project_structure.as_deref(), Some("vstfs:///Area/3"));
    assert_eq!(
        test.deployment_items,
        Some(vec![
            DeploymentItem {
                source: "config.json".to_string(),
                target: String::new(),
            },
            DeploymentItem {
                source: "data.csv".to_string(),
                target: "input".to_string(),
            },
        ])
    );
    assert!(test.do_not_parallelize);
    assert!(!test.ignored);
}

#[test]
fn test_defaults_without_method_attributes() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");

    let test = found.find("NS.Suite.Plain");
    assert_eq!(test.display_name, "Plain");
    assert_eq!(test.categories, vec!["integration", "nightly", "inherited"]);
    assert_eq!(test.traits, vec![Trait::new("Area", "storage")]);
    assert_eq!(test.priority, None);
    assert_eq!(test.work_item_ids, None);
    assert_eq!(test.description, None);
    assert!(!test.do_not_parallelize);
    // Class-level deployment items apply to every method.
    assert_eq!(test.deployment_items.as_ref().map(Vec::len), Some(1));
}

#[test]
fn test_ignore_on_method_and_class() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Active
    attributes: [{type: TestClass}]
    methods:
      - name: Skipped
        attributes:
          - {type: TestMethod}
          - {type: Ignore, args: ["flaky on CI"]}
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Parked
    attributes:
      - {type: TestClass}
      - {type: Ignore, args: ["whole class parked"]}
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
      - name: AlsoIgnored
        attributes:
          - {type: TestMethod}
          - {type: Ignore}
"#,
    );
    let found = ws.discover("Tests.yaml");

    let skipped = found.find("NS.Active.Skipped");
    assert!(skipped.ignored);
    assert_eq!(skipped.ignore_message.as_deref(), Some("flaky on CI"));
    assert!(!found.find("NS.Active.Runs").ignored);

    let parked = found.find("NS.Parked.Runs");
    assert!(parked.ignored);
    assert_eq!(parked.ignore_message.as_deref(), Some("whole class parked"));

    // The method has no message of its own, so the class message is used.
    let also = found.find("NS.Parked.AlsoIgnored");
    assert!(also.ignored);
    assert_eq!(also.ignore_message.as_deref(), Some("whole class parked"));
}

#[test]
fn test_condition_groups() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Conditions
    attributes: [{type: TestClass}]
    methods:
      - name: AnyOsMatches
        attributes:
          - {type: TestMethod}
          - {type: OSCondition, named: {GroupName: os, ConditionMet: false, IgnoreMessage: "not windows"}}
          - {type: OSCondition, named: {GroupName: os, ConditionMet: true}}
      - name: ExcludedOnCi
        attributes:
          - {type: TestMethod}
          - {type: CICondition, base_types: [ConditionBase], named: {Mode: exclude, ConditionMet: true, GroupName: ci, IgnoreMessage: "skipped on CI"}}
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert!(!found.find("NS.Conditions.AnyOsMatches").ignored);
    let excluded = found.find("NS.Conditions.ExcludedOnCi");
    assert!(excluded.ignored);
    assert_eq!(excluded.ignore_message.as_deref(), Some("skipped on CI"));
}

#[test]
fn test_empty_deployment_item_is_skipped_with_warning() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Suite
    attributes: [{type: TestClass}]
    methods:
      - name: Deploys
        attributes:
          - {type: TestMethod}
          - {type: DeploymentItem, args: [""]}
          - {type: DeploymentItem, args: [schema.sql]}
"#,
    );
    let found = ws.discover("Tests.yaml");

    let test = found.find("NS.Suite.Deploys");
    assert_eq!(
        test.deployment_items,
        Some(vec![DeploymentItem {
            source: "schema.sql".to_string(),
            target: String::new(),
        }])
    );
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].contains("NS.Suite.Deploys"));
}

#[test]
fn test_bad_attribute_argument_skips_only_that_method() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Suite
    attributes: [{type: TestClass}]
    methods:
      - name: BadPriority
        attributes:
          - {type: TestMethod}
          - {type: Priority, args: [high]}
      - name: Fine
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.Suite.Fine"]);
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].contains("NS.Suite.BadPriority"));
}

#[test]
fn test_attribute_construction_failure_is_not_fatal() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Suite
    attributes: [{type: TestClass}]
    methods:
      - name: Broken
        attributes:
          - {type: TestMethod}
          - {type: Owner, error: "constructor threw"}
      - name: Fine
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Tests.yaml");

    // Reflection failures read as "no attributes", so Broken is not a test.
    assert_eq!(found.names(), vec!["NS.Suite.Fine"]);
}
