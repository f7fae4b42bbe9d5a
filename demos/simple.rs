//! Reversing a list twice gives back the original list.

use forall::*;

fn main() -> error::Result<()> {
    println!("Testing list property: reverse(reverse(xs)) == xs");
    let reverse_twice = for_all(arb_list(arb_int(), 20), |xs| {
        let mut ys = xs.clone();
        ys.reverse();
        ys.reverse();
        &ys == xs
    })
    .named("reverse_twice");
    check(&reverse_twice, 100)?;
    println!();

    println!("Checking a group of string properties");
    let mut strings = Properties::new("Strings");
    strings.add(
        "length_of_concat",
        for_all((arb_str(20), arb_str(20)), |(a, b)| {
            format!("{a}{b}").chars().count() == a.chars().count() + b.chars().count()
        }),
    );
    strings.add(
        "uppercase_keeps_ascii_length",
        for_all(arb_str(20), |s| {
            let ascii: String = s.chars().filter(char::is_ascii).collect();
            ascii.to_ascii_uppercase().len() == ascii.len()
        }),
    );
    check_all(&strings, 100)?;

    Ok(())
}
