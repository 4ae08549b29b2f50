/// A ternary expression.  Rust's `if` is already an expression, but
/// `cargo fmt` spreads every one of them over five lines, and the
/// boundary rules for seams and neighbors read far better as a table
/// of one-liners.
#[macro_export]
macro_rules! cq {
    ($condition: expr, $_true: expr, $_false: expr) => {
        if $condition {
            $_true
        } else {
            $_false
        }
    };
}
