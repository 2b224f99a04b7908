// Example: a load-on-demand grid driven by scroll-near-end signals.
use sentinel_grid::{IgnoreReason, Row, SignalOutcome, VirtualisationOptions};
use sentinel_grid_adapter::{GridController, SentinelEvent, VecDataSource};

fn main() {
    let source = VecDataSource::from_fn(120, |i| Row::new(i, 5_000 + i as u64));
    let options = VirtualisationOptions::new().with_load_on_demand(true);
    let mut grid = GridController::new(options, source);

    while grid.needs_scroll_sentinel() {
        let outcome = grid.handle(&SentinelEvent::ScrollNearEnd, 0);
        let state = grid.state();
        println!(
            "{outcome:?}: loaded {}/{}",
            state.loaded_count, state.total_count
        );
    }
    assert_eq!(
        grid.on_scroll_near_end(),
        SignalOutcome::Ignored(IgnoreReason::Exhausted)
    );
    println!("last row: {:?}", grid.rows().last().map(|r| r.identity));
}
