//! AST dumping tool for debugging the TypeScript lowering.
//!
//! Prints the arena tree by default, or the raw tree-sitter tree with `--raw`.

use std::env;
use std::fs;
use std::path::Path;

use ts_clippy::parser::{Dialect, parse_concrete, parse_with_dialect};

fn print_node(node: tree_sitter::Node, source: &str, indent: usize) {
    let indent_str = "  ".repeat(indent);
    let text = source.get(node.byte_range()).unwrap_or("");
    let text_display = if text.chars().count() > 50 {
        format!("{}...", text.chars().take(50).collect::<String>())
    } else {
        text.to_string()
    };
    let text_display = text_display.replace('\n', "\\n");

    println!("{}{}  \"{}\"", indent_str, node.kind(), text_display);
}

/// Pre-order walk driven by a cursor, without recursion.
fn print_concrete(root: tree_sitter::Node, source: &str) {
    let mut cursor = root.walk();
    let mut depth = 0usize;
    loop {
        print_node(cursor.node(), source, depth);
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return;
            }
            depth -= 1;
        }
    }
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let raw = args.iter().any(|a| a == "--raw");
    let Some(file_path) = args.iter().find(|a| !a.starts_with("--")) else {
        eprintln!("Usage: dump_ast [--raw] <file.ts>");
        std::process::exit(1);
    };

    let source = fs::read_to_string(file_path).unwrap_or_else(|e| {
        eprintln!("Failed to read {}: {}", file_path, e);
        std::process::exit(1);
    });
    let dialect = Dialect::for_path(Path::new(file_path));

    println!("AST for {}:", file_path);
    println!("================");
    if raw {
        match parse_concrete(&source, dialect) {
            Ok(tree) => print_concrete(tree.root_node(), &source),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    } else {
        match parse_with_dialect(&source, dialect) {
            Ok(tree) => print!("{}", tree.outline()),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}
