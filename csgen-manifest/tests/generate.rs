//! Manifest-driven generation tests.
//!
//! Run `cargo insta review` to update snapshots when making intentional changes.

use std::str::FromStr;

use csgen_core::Overwrite;
use csgen_manifest::{CsgenToml, Error, Manifest};
use tempfile::TempDir;

const SHOP: &str = r#"
[generator]
assembly = "Shop.Generators"
version = "1.2.0"

[options]
use_file_scoped_namespace = true
default_outer_using_directives = ["System"]

[[types]]
name = "Order"
namespace = "Shop.Orders"
modifiers = ["partial"]
doc = "A customer order."
emitters = ["properties", "equatable"]

[[types.members]]
name = "Id"
type = "System.Guid"
readonly = true

[[types.members]]
name = "Customer"
type = "Customer"
required = true
init = true

[[types.members]]
name = "Total"
type = "decimal"
setter = "private"

[[types]]
name = "Customer"
namespace = "Shop.Customers"
record = true
modifiers = ["partial"]

[[types.members]]
name = "Name"
type = "string"

[[types.snippets]]
text = "public override string ToString() => Name;"
usings = ["System.Text"]

[[types]]
name = "Status"
namespace = "Shop.Orders"
kind = "enum"
emitters = []
containing = [{ name = "Order" }]

[[types.snippets]]
text = "Pending,\nShipped,"
"#;

#[test]
fn test_generate_order() {
    let manifest = Manifest::from_str(SHOP).expect("Failed to parse manifest");
    let collection = manifest.generate().expect("Failed to generate");

    assert_eq!(collection.len(), 3);
    let order = collection.get("Order.g.cs").expect("Order.g.cs not found");
    insta::assert_snapshot!("shop_order", order);
}

#[test]
fn test_generate_record_with_snippet() {
    let manifest = Manifest::from_str(SHOP).expect("Failed to parse manifest");
    let collection = manifest.generate().expect("Failed to generate");
    let customer = collection.get("Customer.g.cs").expect("Customer.g.cs not found");

    assert!(customer.contains("using System.Text;\nusing System;\n\nnamespace Shop.Customers;\n"));
    assert!(customer.contains(
        "public partial record Customer\n{\n    public string Name { get; set; }\n\n    public override string ToString() => Name;\n}"
    ));
}

#[test]
fn test_generate_nested_enum() {
    let manifest = Manifest::from_str(SHOP).expect("Failed to parse manifest");
    let collection = manifest.generate().expect("Failed to generate");
    let status = collection.get("Status.g.cs").expect("Status.g.cs not found");

    assert!(status.ends_with(
        "public partial class Order\n{\n    [global::System.CodeDom.Compiler.GeneratedCodeAttribute(\"Shop.Generators\", \"1.2.0\")]\n    public enum Status\n    {\n        Pending,\n        Shipped,\n    }\n}"
    ));
}

#[test]
fn test_open_and_export() {
    let temp = TempDir::new().unwrap();
    let manifest_path = temp.path().join("csgen.toml");
    std::fs::write(&manifest_path, SHOP).unwrap();

    let toml = CsgenToml::open(&manifest_path).unwrap();
    assert_eq!(toml.base_dir(), temp.path());
    assert_eq!(toml.content(), SHOP);

    let out = temp.path().join("Generated");
    let collection = toml.manifest().generate().unwrap();
    let written = collection.export_to(&out).unwrap();
    assert_eq!(written.len(), 3);
    assert!(out.join("Order.g.cs").exists());

    std::fs::write(out.join("Order.g.cs"), "// edited").unwrap();
    let results = collection.export_to_with(&out, Overwrite::IfMissing).unwrap();
    assert!(results.iter().all(|r| !r.is_written()));
    assert_eq!(
        std::fs::read_to_string(out.join("Order.g.cs")).unwrap(),
        "// edited"
    );
}

#[test]
fn test_open_missing_file() {
    let temp = TempDir::new().unwrap();
    let result = CsgenToml::open(temp.path().join("missing.toml"));

    assert!(matches!(result.map(|_| ()).map_err(|e| *e), Err(Error::Io { .. })));
}

#[test]
fn test_error_points_into_named_file() {
    let err = Manifest::from_str_with_filename("[[types]]\nname = \"2nd\"", "shop.toml")
        .unwrap_err();

    assert!(matches!(*err, Error::InvalidIdentifier { .. }));
    assert_eq!(err.to_string(), "invalid type name '2nd'");
}
