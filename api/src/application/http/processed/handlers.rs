pub mod get_processed_image;
