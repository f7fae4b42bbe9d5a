//! A property that does not hold for negative numbers, to show shrinking.

use forall::*;

fn main() -> error::Result<()> {
    println!("Testing property that should fail: sqrt(n * n) == n");
    let square_root = for_all(arb_int(), |&n| {
        let n = n as f64;
        (n * n).sqrt() == n
    })
    .named("square_root");
    check(&square_root, 100)?;
    println!();

    let seed = Seed::random();
    println!("Same property over a small range, reproducible with {seed}");
    let config = Config::default().with_tests(50).with_seed(seed);
    let small = from_gen_shrink(choose(-1000_i64, 1000)?, IntShrinker);
    let seeded = for_all_shrink(small, |&n| n >= 0).with_config(&config);
    let result = PropChecker::from_config(&config)?.check(&seeded);
    println!("{result}");

    Ok(())
}
