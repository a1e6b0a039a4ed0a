pub mod ranker;
pub mod result_set;
pub mod similarity_scorer;
