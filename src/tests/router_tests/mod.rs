mod favorites_tests;
mod listing_tests;
