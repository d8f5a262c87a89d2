pub mod contribution_repository;
