use axum_delivery_api::ratings::{average_rating, good_review_percentage, reviewer_count_label};

#[test]
fn no_reviews_yield_zero_stats() {
    assert_eq!(average_rating(&[]), 0.0);
    assert_eq!(reviewer_count_label(0), "0");
    assert_eq!(good_review_percentage(&[]), "0%");
}

#[test]
fn four_reviews_example() {
    // 4 reviews [5,5,2,4]: mean 4.0, more than 3 reviewers, 3 of 4 above 3.
    let ratings = [5, 5, 2, 4];
    assert_eq!(average_rating(&ratings), 4.0);
    assert_eq!(reviewer_count_label(ratings.len()), "3+");
    assert_eq!(good_review_percentage(&ratings), "75%");
}

#[test]
fn average_rounds_to_one_decimal() {
    assert_eq!(average_rating(&[4, 4, 5]), 4.3);
    assert_eq!(average_rating(&[4, 5]), 4.5);
    assert_eq!(average_rating(&[3]), 3.0);
}

#[test]
fn average_rounds_ties_to_even() {
    // mean 1.25 lands exactly between 1.2 and 1.3
    assert_eq!(average_rating(&[1, 1, 1, 2]), 1.2);
}

#[test]
fn reviewer_label_caps_at_three_plus() {
    assert_eq!(reviewer_count_label(1), "1");
    assert_eq!(reviewer_count_label(2), "2");
    assert_eq!(reviewer_count_label(3), "3");
    assert_eq!(reviewer_count_label(4), "3+");
    assert_eq!(reviewer_count_label(17), "3+");
}

#[test]
fn good_percentage_counts_only_ratings_above_three() {
    // 3 does not count as good
    assert_eq!(good_review_percentage(&[3, 3, 3]), "0%");
    assert_eq!(good_review_percentage(&[4, 5]), "100%");
    assert_eq!(good_review_percentage(&[5, 4, 1, 1]), "50%");
}

#[test]
fn good_percentage_rounds_ties_to_even() {
    // 1 good of 8 = 12.5%
    assert_eq!(good_review_percentage(&[5, 1, 1, 1, 1, 1, 1, 1]), "12%");
}

#[test]
fn good_percentage_rounds_to_nearest() {
    // 1 good of 3 = 33.33..%
    assert_eq!(good_review_percentage(&[5, 1, 1]), "33%");
    // 2 good of 3 = 66.66..%
    assert_eq!(good_review_percentage(&[5, 5, 1]), "67%");
}
