// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with *some* **content** and a [link](http://example.com/ \"Example\").\n\n* Bullet point\n    * Nested item\n* Another item\n\n    fn example() {\n        println!(\"Hello\");\n    }\n\n> Quoted `code` and <http://example.com/>\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_reference_heavy(links: usize) -> String {
    let mut content = String::new();
    for i in 0..links {
        content.push_str(&format!("See [item {i}][ref{i}] and ![icon {i}][img{i}].\n\n"));
    }
    for i in 0..links {
        content.push_str(&format!("[ref{i}]: http://example.com/{i} \"Ref {i}\"\n"));
        content.push_str(&format!("[img{i}]: /icons/{i}.png\n"));
    }
    content
}

#[allow(dead_code)]
pub fn generate_nested_lists(depth: usize, breadth: usize) -> String {
    let mut content = String::new();
    for item in 0..breadth {
        for level in 0..depth {
            let indent = "    ".repeat(level);
            content.push_str(&format!("{indent}* Item {item} at level {level}\n"));
        }
    }
    content
}

#[allow(dead_code)]
pub fn generate_large_document() -> String {
    let mut content = generate_markdown_content(50);
    content.push_str(&generate_reference_heavy(50));
    content.push_str(&generate_nested_lists(5, 20));
    content
}
