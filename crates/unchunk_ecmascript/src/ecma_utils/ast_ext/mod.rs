pub mod expression_ext;
