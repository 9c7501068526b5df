mod basic;
mod corpus;
mod proptest_pipeline;
