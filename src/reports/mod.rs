use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Two-column key/value table.
pub fn print_summary(title: &str, rows: &[(&str, String)]) {
    println!("\n=== {} ===", title);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    for (label, value) in rows {
        table.add_row(vec![
            Cell::new(label).add_attribute(Attribute::Bold),
            Cell::new(value).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

/// The most confusable pairs of a list, most similar first.
pub fn print_closest_pairs(pairs: &[(&str, &str, f32)]) {
    if pairs.is_empty() {
        return;
    }

    println!("\n=== CLOSEST PAIRS ===");
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("Word").add_attribute(Attribute::Bold),
            Cell::new("Word").add_attribute(Attribute::Bold),
            Cell::new("Similarity").add_attribute(Attribute::Bold),
        ]);

    for (i, (a, b, sim)) in pairs.iter().enumerate() {
        // Distance 1 under the default metric.
        let color = if *sim >= 0.1 { Color::Red } else { Color::Reset };
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(a),
            Cell::new(b),
            Cell::new(format!("{:.3e}", sim))
                .fg(color)
                .set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{table}");
}

pub fn print_problems(problems: &[String]) {
    if problems.is_empty() {
        println!("\n✅ List is well formed.");
        return;
    }

    println!("\n=== PROBLEMS ({}) ===", problems.len());
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    for p in problems {
        table.add_row(vec![Cell::new(p).fg(Color::Red)]);
    }
    println!("{table}");
}
