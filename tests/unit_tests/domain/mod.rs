mod extracted_content_test;
mod file_type_test;
