use chain_hash::HashTable;

fn main() {
    tracing_subscriber::fmt().init();

    let mut table = HashTable::new(2);

    table.insert("line_1", "Tiny hash table");
    table.insert("line_2", "Filled beyond capacity");
    table.insert("line_3", "Linked list saves the day!");

    // Storing beyond the starting capacity still retrieves cleanly.
    println!("{}", table.retrieve("line_1").unwrap());
    println!("{}", table.retrieve("line_2").unwrap());
    println!("{}", table.retrieve("line_3").unwrap());

    let old_capacity = table.capacity();
    table.resize();
    let new_capacity = table.capacity();

    println!("\nResized from {old_capacity} to {new_capacity}.\n");

    // Data is intact after the rehash.
    println!("{}", table.retrieve("line_1").unwrap());
    println!("{}", table.retrieve("line_2").unwrap());
    println!("{}", table.retrieve("line_3").unwrap());

    println!(
        "\n{} entries across {} buckets ({:.2}% load factor)",
        table.len(),
        table.capacity(),
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    // Removing an absent key only warns; the subscriber above makes the
    // diagnostic visible.
    table.remove("line_4");
    println!("Entries after removing a missing key: {}", table.len());
}
