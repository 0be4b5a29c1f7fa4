//! Derived store statistics, recomputed from the full review collection on
//! every read.

/// Mean of all ratings rounded to one decimal place; 0 when there are no
/// reviews. Ties round to even.
pub fn average_rating(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    let sum: i64 = ratings.iter().map(|&r| r as i64).sum();
    let mean = sum as f64 / ratings.len() as f64;
    (mean * 10.0).round_ties_even() / 10.0
}

/// Exact reviewer count rendered as a label, capped at "3+".
pub fn reviewer_count_label(count: usize) -> String {
    if count == 0 {
        return "0".to_string();
    }
    if count > 3 {
        "3+".to_string()
    } else {
        count.to_string()
    }
}

/// Share of reviews with rating above 3, as a whole percentage. Ties round
/// to even.
pub fn good_review_percentage(ratings: &[i32]) -> String {
    if ratings.is_empty() {
        return "0%".to_string();
    }
    let good = ratings.iter().filter(|&&r| r > 3).count();
    let pct = ((good * 100) as f64 / ratings.len() as f64).round_ties_even();
    format!("{}%", pct as i64)
}
