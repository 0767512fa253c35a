use pretty_assertions::assert_eq;
use test_discovery::DiscoverySettings;

use crate::fixtures::Workspace;

const TESTS: &str = r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Base
    methods:
      - name: Foo
        attributes: [{type: TestMethod}]
      - name: Shadowed
        attributes: [{type: TestMethod}]
      - name: Overridable
        slot: virtual
        attributes: [{type: TestMethod}]
  - full_name: NS.Derived
    base_type: NS.Base
    attributes: [{type: TestClass}]
    methods:
      - name: Bar
        attributes: [{type: TestMethod}]
      - name: Shadowed
        slot: new
        attributes: [{type: TestMethod}]
      - name: Overridable
        slot: override
        attributes: [{type: TestMethod}]
"#;

#[test]
fn test_inherited_methods_are_reported_on_the_derived_class() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");

    let mut names = found.names();
    names.sort();
    assert_eq!(
        names,
        vec![
            "NS.Derived.Bar",
            "NS.Derived.Foo",
            "NS.Derived.Overridable",
            "NS.Derived.Shadowed",
        ]
    );
    assert!(found.warnings.is_empty());

    let foo = found.find("NS.Derived.Foo");
    assert_eq!(foo.test_method.full_class_name, "NS.Derived");
    assert_eq!(
        foo.test_method.declaring_class_full_name.as_deref(),
        Some("NS.Base")
    );
    // Same assembly, so no declaring assembly.
    assert_eq!(foo.test_method.declaring_assembly_name, None);

    let bar = found.find("NS.Derived.Bar");
    assert_eq!(bar.test_method.declaring_class_full_name, None);
}

#[test]
fn test_hiding_method_wins_over_base_declaration() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");

    let shadowed: Vec<_> = found
        .tests()
        .iter()
        .filter(|t| t.test_method.name == "Shadowed")
        .collect();
    assert_eq!(shadowed.len(), 1);
    assert_eq!(shadowed[0].test_method.declaring_class_full_name, None);
}

#[test]
fn test_override_reports_the_class_that_introduced_the_slot() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");

    let overridable: Vec<_> = found
        .tests()
        .iter()
        .filter(|t| t.test_method.name == "Overridable")
        .collect();
    assert_eq!(overridable.len(), 1);
    assert_eq!(
        overridable[0].test_method.declaring_class_full_name.as_deref(),
        Some("NS.Base")
    );
}

#[test]
fn test_base_class_without_test_class_is_not_enumerated() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", TESTS);
    let found = ws.discover("Tests.yaml");

    assert!(found
        .tests()
        .iter()
        .all(|t| t.test_method.full_class_name == "NS.Derived"));
}

#[test]
fn test_test_class_attribute_is_not_inherited() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Marked
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Unmarked
    base_type: NS.Marked
"#,
    );
    let found = ws.discover("Tests.yaml");
    assert_eq!(found.names(), vec!["NS.Marked.Runs"]);
}

const LIBRARY: &str = r#"
name: Shared.Library
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: Shared.BaseTests
    methods:
      - name: SharedCheck
        attributes: [{type: TestMethod}]
"#;

const CONSUMER: &str = r#"
name: Consumer.Tests
references: [Shared.Library, Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: Consumer.Tests
    base_type: Shared.BaseTests
    attributes: [{type: TestClass}]
    methods:
      - name: LocalCheck
        attributes: [{type: TestMethod}]
"#;

#[test]
fn test_base_methods_from_other_assemblies_included_by_default() {
    let ws = Workspace::new();
    ws.write("Shared.Library.yaml", LIBRARY);
    ws.write("Consumer.Tests.yaml", CONSUMER);
    let found = ws.discover("Consumer.Tests.yaml");

    let shared = found.find("Consumer.Tests.SharedCheck");
    assert_eq!(
        shared.test_method.declaring_class_full_name.as_deref(),
        Some("Shared.BaseTests")
    );
    assert_eq!(
        shared.test_method.declaring_assembly_name,
        Some(ws.canonical("Shared.Library.yaml"))
    );
    assert_eq!(
        shared.test_method.assembly,
        ws.canonical("Consumer.Tests.yaml")
    );
}

#[test]
fn test_base_methods_from_other_assemblies_can_be_excluded() {
    let ws = Workspace::new();
    ws.write("Shared.Library.yaml", LIBRARY);
    ws.write("Consumer.Tests.yaml", CONSUMER);

    let settings = DiscoverySettings {
        enable_base_class_test_methods_from_other_assemblies: false,
        ..DiscoverySettings::default()
    };
    let found = ws.discover_with("Consumer.Tests.yaml", &settings);
    assert_eq!(found.names(), vec!["Consumer.Tests.LocalCheck"]);
}

#[test]
fn test_local_override_of_slot_from_other_assembly_names_the_slot_owner() {
    let ws = Workspace::new();
    ws.write(
        "Shared.Library.yaml",
        r#"
name: Shared.Library
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: Shared.Root
    methods:
      - name: Check
        slot: virtual
        attributes: [{type: TestMethod}]
"#,
    );
    ws.write(
        "Consumer.Tests.yaml",
        r#"
name: Consumer.Tests
references: [Shared.Library, Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: Consumer.Leaf
    base_type: Shared.Root
    attributes: [{type: TestClass}]
    methods:
      - name: Check
        slot: override
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Consumer.Tests.yaml");

    let check = found.find("Consumer.Leaf.Check");
    assert_eq!(
        check.test_method.declaring_class_full_name.as_deref(),
        Some("Shared.Root")
    );
    assert_eq!(
        check.test_method.declaring_assembly_name,
        Some(ws.canonical("Shared.Library.yaml"))
    );

    // The override itself is local, so excluding other assemblies keeps it.
    let settings = DiscoverySettings {
        enable_base_class_test_methods_from_other_assemblies: false,
        ..DiscoverySettings::default()
    };
    let found = ws.discover_with("Consumer.Tests.yaml", &settings);
    assert_eq!(found.names(), vec!["Consumer.Leaf.Check"]);
}
