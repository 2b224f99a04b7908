// Example: drive the range engine directly with synthetic sentinel crossings.
use sentinel_grid::{
    GateRun, ScrollGate, VirtualisationOptions, VirtualisationState, for_each_sentinel_row,
    lower_boundary_crossed, parse_row_index, upper_boundary_crossed,
};

fn main() {
    let options = VirtualisationOptions::new()
        .with_page_size(10)
        .with_overflow(20);
    let mut state = VirtualisationState::new(&options, 100);
    let gate = ScrollGate::new(options.refresh_delay_ms);
    println!("initial: {state:?}");

    // The below sentinel on row 35 entered the viewport.
    let index = parse_row_index("35").unwrap();
    if let Some(GateRun::Changed { value, ticket }) =
        gate.run(0, || lower_boundary_crossed(&state, &options, index))
    {
        state = value;
        println!("after lower(35): {state:?}, refresh armed: {ticket:?}");
    }

    // Replaying it is stale.
    let replay = gate.run(10, || lower_boundary_crossed(&state, &options, index));
    println!("replay lower(35): {replay:?}");

    if let Some(GateRun::Changed { value, .. }) =
        gate.run(20, || upper_boundary_crossed(&state, &options, 16))
    {
        state = value;
        println!("after upper(16): {state:?}");
    }

    println!("refresh at 100ms: {:?}", gate.poll_refresh(100));
    println!("refresh at 270ms: {:?}", gate.poll_refresh(270));

    let (mut above, mut below) = (Vec::new(), Vec::new());
    for_each_sentinel_row(&state, &options, state.total_count, |row| {
        if row.above_sentinel {
            above.push(row.index);
        }
        if row.below_sentinel {
            below.push(row.index);
        }
    });
    println!("above sentinels: {:?}..={:?}", above.first(), above.last());
    println!("below sentinels: {:?}..={:?}", below.first(), below.last());

    println!("malformed payload: {:?}", parse_row_index("-1"));
}
