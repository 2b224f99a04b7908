// Example: a host loop that plays the viewport-observer layer for a controller.
use sentinel_grid::{RenderMode, Row, VirtualisationOptions};
use sentinel_grid_adapter::{GridController, ObserverCommand, SentinelEvent, VecDataSource};

fn main() {
    let source = VecDataSource::from_fn(10_000, |i| Row::new(i, i as u64));
    let mut grid = GridController::new(VirtualisationOptions::new(), source);

    let viewport = 12;
    let mut armed: Vec<SentinelEvent> = Vec::new();
    let mut now_ms = 0u64;

    for top in (0..600).step_by(6) {
        for cmd in grid.take_commands() {
            match cmd {
                ObserverCommand::Observe(req) => {
                    armed.clear();
                    grid.for_each_sentinel_row(|row| {
                        if row.above_sentinel {
                            armed.push(SentinelEvent::upper(row.index.to_string()));
                        }
                        if row.below_sentinel {
                            armed.push(SentinelEvent::lower(row.index.to_string()));
                        }
                    });
                    println!("observe {} ({} sentinels)", req.container_id, armed.len());
                }
                ObserverCommand::Dispose { container_id } => println!("dispose {container_id}"),
            }
        }

        // Each sentinel fires once when it scrolls into view.
        let (fired, rest): (Vec<_>, Vec<_>) = armed.drain(..).partition(|ev| match ev {
            SentinelEvent::UpperBoundaryCrossed { raw }
            | SentinelEvent::LowerBoundaryCrossed { raw } => raw
                .parse::<usize>()
                .is_ok_and(|i| i >= top && i < top + viewport),
            _ => false,
        });
        armed = rest;
        for ev in &fired {
            grid.handle(ev, now_ms);
        }

        now_ms += 300;
        if let Some(refresh) = grid.tick(now_ms) {
            let full = grid
                .row_classes()
                .iter()
                .filter(|c| c.mode == RenderMode::Full)
                .count();
            println!(
                "top={top:>4} refresh {:?}: range {}..={} ({full} full rows)",
                refresh.ticket, refresh.state.range_start, refresh.state.range_end
            );
        }
    }

    grid.dispose();
    println!("pending commands after dispose: {:?}", grid.take_commands());
}
