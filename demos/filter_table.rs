/// Filter Table Example
///
/// This example demonstrates:
/// - Building the demo table of King/Queen rows
/// - Per-column controllers committing search, selection and sort
/// - Filters composing as a pipeline in mapping order
/// - Clearing one column while the others stay applied

use tablefilter::{
    apply_filters, record, ColumnConfig, ColumnFilter, FieldValue, FilterMapping, Record,
    SortDirection, ValueKind,
};

fn print_rows(rows: &[&Record], limit: usize) {
    for row in rows.iter().take(limit) {
        println!(
            "      {:<10} age {:<3} {:<7} {}",
            row["name"].to_text(),
            row["age"].to_text(),
            row["gender"].to_text(),
            row["address"]
        );
    }
    if rows.len() > limit {
        println!("      ... {} more", rows.len() - limit);
    }
}

fn main() {
    println!("=== TableFilter Example ===\n");

    // 1. Build the table
    println!("1. Creating demo table...");
    let records: Vec<Record> = (0..100)
        .map(|i: i64| {
            let name = if i % 2 == 1 { format!("King {}", i) } else { format!("Queen {}", i) };
            record([
                ("key", FieldValue::Int(i)),
                ("name", FieldValue::String(name)),
                ("age", FieldValue::Int(32 + (i * 7) % 20)),
                ("gender", FieldValue::from(if i % 2 == 1 { "Male" } else { "Female" })),
                ("address", FieldValue::String(format!("London, Park Lane no. {}", i))),
            ])
        })
        .collect();
    println!("   Added {} rows\n", records.len());

    let mut filters = FilterMapping::new();
    let mut name = ColumnFilter::new("name", ColumnConfig::default(), &filters);
    let mut age = ColumnFilter::new("age", ColumnConfig::sort_only(ValueKind::Number), &filters);
    let mut gender = ColumnFilter::new(
        "gender",
        ColumnConfig {
            show_sorting: false,
            show_search: false,
            ..ColumnConfig::default()
        },
        &filters,
    );

    // 2. Select a gender from the candidate list
    println!("2. Selecting 'Male' in the gender column...");
    let candidates: Vec<String> = gender
        .selection_candidates(&records, "")
        .iter()
        .map(|row| row["gender"].to_text())
        .collect();
    println!("   Candidates: {:?}", candidates);
    gender.set_selection(vec![FieldValue::from("Male")]);
    filters = gender.apply(&filters).into_filters();
    println!("   Rows: {}\n", apply_filters(&records, &filters).len());

    // 3. Search names
    println!("3. Searching names for 'king 1'...");
    name.set_search_query("king 1");
    filters = name.apply(&filters).into_filters();
    print_rows(&apply_filters(&records, &filters), 5);
    println!();

    // 4. Sort by age
    println!("4. Sorting by age, descending...");
    age.set_sort(SortDirection::Descending);
    filters = age.apply(&filters).into_filters();
    print_rows(&apply_filters(&records, &filters), 5);
    println!();

    // 5. Clear the name search
    println!("5. Clearing the name filter...");
    let event = name.clear(&filters);
    println!("   Event: {}", serde_json::to_string(event.column()).unwrap());
    filters = event.into_filters();
    println!("   Active columns: {:?}", filters.active_columns());
    print_rows(&apply_filters(&records, &filters), 5);

    println!("\n=== Example Complete ===");
}
