//! Basic example composing sources and adapters by hand.

use std::ops::ControlFlow;

use sluice::{for_each, materialize, range_between, Advance, IterError, Sequence};

fn main() -> anyhow::Result<()> {
    // filter(is_even, map(x -> x, range(1, 10)))
    let evens = range_between(1, 10)
        .map(|x| Ok(x))
        .filter(|x| Ok(x % 2 == 0));
    println!("evens: {:?}", materialize(evens)?);

    // A borrowed list walked by a cursor, with a transform that can fail.
    let words = ["alpha", "beta", "", "delta"];
    let lengths = (&words).produce_iterator().map(|w| {
        if w.is_empty() {
            Err(IterError::transform_failure("empty word"))
        } else {
            Ok(w.len())
        }
    });
    match materialize(lengths) {
        Ok(lengths) => println!("lengths: {lengths:?}"),
        Err(err) => println!("pipeline aborted: {err}"),
    }

    // A for-loop with an early break.
    let summary = for_each(range_between(0, 100), |x| {
        println!("visiting {x}");
        Ok(if x == 3 {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    })?;
    println!("loop bound {} values ({:?})", summary.iterations, summary.exit);

    Ok(())
}
