// Example: load-on-demand paging against a synthetic data source.
use sentinel_grid::{DataSource, IncrementalLoader, Row, VirtualisationOptions};

struct Numbers(usize);

impl DataSource for Numbers {
    type Key = u64;

    fn total_row_count(&self) -> usize {
        self.0
    }

    fn rows(&self, start_index: usize, count: usize) -> Vec<Row<u64>> {
        let end = (start_index + count).min(self.0);
        (start_index..end)
            .map(|i| Row::new(i, i as u64).with_type_name("Number"))
            .collect()
    }
}

fn main() {
    let options = VirtualisationOptions::new().with_load_on_demand(true);
    let source = Numbers(250);
    let mut loader = IncrementalLoader::new(&options);

    loop {
        let appended = loader.load_next_page(&source);
        if appended == 0 {
            break;
        }
        println!(
            "appended {appended:>3} rows, loaded {}/{}",
            loader.loaded_count(),
            source.total_row_count()
        );
    }

    // Asynchronous hosts split the fetch in two.
    let mut loader = IncrementalLoader::new(&options);
    let request = loader.begin_next_page(source.total_row_count()).unwrap();
    println!("fetch requested: {request:?}, busy={}", loader.is_loading());
    let rows = source.rows(request.start, request.count);
    loader.complete(request, rows);
    println!("loaded after completion: {}", loader.loaded_count());
}
