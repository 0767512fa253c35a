use pretty_assertions::assert_eq;
use test_discovery::DiscoverySettings;

use crate::fixtures::Workspace;

#[test]
fn test_generic_test_method_is_reported_and_skipped() {
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
      - name: Generic
        generic_definition: true
        attributes: [{type: TestMethod}]
      - name: Concrete
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.Suite.Concrete"]);
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].contains("UTA007"));
    assert!(found.warnings[0].contains("NS.Suite.Generic"));
}

#[test]
fn test_signature_rejections_are_silent() {
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
      - name: Private
        visibility: private
        attributes: [{type: TestMethod}]
      - name: Static
        static: true
        attributes: [{type: TestMethod}]
      - name: ReturnsInt
        return_type: System.Int32
        attributes: [{type: TestMethod}]
      - name: AsyncVoid
        attributes:
          - {type: TestMethod}
          - {type: AsyncStateMachine, args: ["NS.Suite+<AsyncVoid>d__0"]}
      - name: AsyncTask
        return_type: System.Threading.Tasks.Task
        attributes:
          - {type: TestMethod}
          - {type: AsyncStateMachine, args: ["NS.Suite+<AsyncTask>d__1"]}
      - name: NotATest
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.Suite.AsyncTask"]);
    assert!(found.warnings.is_empty());

    let task = found.find("NS.Suite.AsyncTask");
    assert!(task.test_method.is_async);
    assert_eq!(
        task.test_method.async_type_name.as_deref(),
        Some("NS.Suite+<AsyncTask>d__1")
    );
}

#[test]
fn test_derived_test_method_attribute_is_recognised() {
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
      - name: DataDriven
        attributes: [{type: DataTestMethod}]
      - name: Custom
        attributes: [{type: RetryTestMethod, base_types: [TestMethod]}]
"#,
    );
    let mut names = ws.discover("Tests.yaml").names();
    names.sort();
    assert_eq!(names, vec!["NS.Suite.Custom", "NS.Suite.DataDriven"]);
}

const VISIBILITY: &str = r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Hidden
    visibility: internal
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Outer
    visibility: private
  - full_name: NS.Outer+Nested
    declaring_type: NS.Outer
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Visible
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
      - name: InternalRuns
        visibility: internal
        attributes: [{type: TestMethod}]
"#;

#[test]
fn test_non_public_classes_warn() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", VISIBILITY);
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.Visible.Runs"]);
    assert_eq!(found.warnings.len(), 2);
    assert!(found.warnings.iter().all(|w| w.starts_with("UTA001")));
    assert!(found.warnings.iter().any(|w| w.contains("NS.Hidden")));
    assert!(found.warnings.iter().any(|w| w.contains("NS.Outer+Nested")));
}

#[test]
fn test_discover_internals() {
    let ws = Workspace::new();
    ws.write("Tests.yaml", VISIBILITY);
    let settings = DiscoverySettings {
        discover_internals: true,
        ..DiscoverySettings::default()
    };
    let found = ws.discover_with("Tests.yaml", &settings);

    let mut names = found.names();
    names.sort();
    assert_eq!(
        names,
        vec!["NS.Hidden.Runs", "NS.Visible.InternalRuns", "NS.Visible.Runs"]
    );
    // A private enclosing type is never discoverable.
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].contains("NS.Outer+Nested"));
}

#[test]
fn test_generic_and_abstract_classes() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.Generic`1
    generic_definition: true
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.AbstractBase
    abstract: true
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Concrete
    base_type: NS.AbstractBase
    attributes: [{type: TestClass}]
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.Concrete.Runs"]);
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].starts_with("UTA002"));
}

#[test]
fn test_invalid_test_context_property() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.ReadOnlyContext
    attributes: [{type: TestClass}]
    properties:
      - name: TestContext
        type_name: Microsoft.VisualStudio.TestTools.UnitTesting.TestContext
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.WritableContext
    attributes: [{type: TestClass}]
    properties:
      - name: TestContext
        type_name: Microsoft.VisualStudio.TestTools.UnitTesting.TestContext
        setter: {}
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Tests.yaml");

    assert_eq!(found.names(), vec!["NS.WritableContext.Runs"]);
    assert_eq!(found.warnings.len(), 1);
    assert!(found.warnings[0].starts_with("UTA031"));
    assert!(found.warnings[0].contains("NS.ReadOnlyContext"));
}

#[test]
fn test_interface_and_struct_are_never_test_classes() {
    let ws = Workspace::new();
    ws.write(
        "Tests.yaml",
        r#"
name: Tests
references: [Microsoft.VisualStudio.TestPlatform.TestFramework]
types:
  - full_name: NS.IContract
    kind: interface
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
  - full_name: NS.Value
    kind: struct
    attributes: [{type: TestClass}]
    methods:
      - name: Runs
        attributes: [{type: TestMethod}]
"#,
    );
    let found = ws.discover("Tests.yaml");
    assert!(found.tests().is_empty());
    assert!(found.warnings.is_empty());
}
