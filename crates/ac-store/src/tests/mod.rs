mod file_storage;
