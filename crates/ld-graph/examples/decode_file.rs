//! Simple decoder to inspect SPDX 3 JSON-LD files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use ld_graph::model::Slot;
use ld_graph::spdx::{element_of, Relationship, LD_CONTEXT};
use ld_graph::{Graph, ObjectRef};

fn label(graph: &Graph, handle: ObjectRef) -> String {
    let Some(record) = graph.get(handle) else {
        return "<foreign>".to_string();
    };
    let name = element_of(record).and_then(|e| e.name.as_deref());
    match (graph.id_of(handle), name) {
        (_, Some(name)) => format!("{name:?}"),
        (Some(id), None) => id.to_string(),
        (None, None) => format!("<anonymous {}>", record.descriptor().name()),
    }
}

fn main() {
    let _ = tracing_subscriber::fmt::try_init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "testdata/sbom-build.json".to_string());

    println!("Reading: {}", path);

    let file = File::open(&path).expect("Failed to open file");
    let decoded = LD_CONTEXT
        .decode_reader(BufReader::new(file))
        .expect("Failed to decode");
    let graph = &decoded.graph;

    println!("\n=== Graph Info ===");
    println!("Context: {}", graph.context());
    println!("Top-level nodes: {}", graph.roots().len());
    println!("Instances: {}", graph.len());

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for (_, record) in graph.iter() {
        *by_type.entry(record.descriptor().name()).or_default() += 1;
    }
    println!("\n=== Types ===");
    for (name, count) in &by_type {
        println!("  {name}: {count}");
    }

    println!("\n=== Relationships ===");
    for (_, record) in graph.iter() {
        let Some(rel) = record.downcast_ref::<Relationship>() else {
            continue;
        };
        let from = rel.from.map_or("<unset>".to_string(), |h| label(graph, h));
        let to: Vec<String> = rel.to.iter().map(|&h| label(graph, h)).collect();
        println!(
            "  {} --{}--> [{}]",
            from,
            rel.relationship_type.as_deref().unwrap_or("?"),
            to.join(", ")
        );
    }

    println!("\n=== Roots ===");
    for &root in graph.roots() {
        let Some(record) = graph.get(root) else {
            continue;
        };
        let set = record
            .descriptor()
            .fields()
            .filter(|f| match record.slot(f.name) {
                Some(Slot::Scalar(s)) => s.to_wire().is_some(),
                Some(Slot::Scalars(s)) => !s.to_wire().is_empty(),
                Some(Slot::Ref(r)) => r.is_some(),
                Some(Slot::Refs(r)) => !r.is_empty(),
                Some(Slot::Nested(_)) | None => false,
            })
            .count();
        println!("  {} ({} fields set)", label(graph, root), set);
    }

    if decoded.errors.is_empty() {
        println!("\nNo errors");
    } else {
        println!("\n=== Errors ({}) ===", decoded.errors.len());
        for err in &decoded.errors {
            println!("  {err}");
        }
    }
}
