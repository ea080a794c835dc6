//! Computers service
//!
//! Record flows behind the list, create, edit and delete routes.
//! Validates submitted records before any write reaches the store.

use crate::database::{Computer, ComputerFilter, ComputerList, CreateComputerRequest, Repository};
use crate::error::{AppError, Result};

/// Service for managing computer records
#[derive(Clone)]
pub struct ComputersService {
    repo: Repository,
}

impl ComputersService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// List computers matching the filter, returned together with the filter
    pub async fn list(&self, filter: ComputerFilter) -> Result<ComputerList> {
        // Blank constraints mean "no constraint"
        let filter = filter.normalized();
        let computers = self.repo.list_computers(&filter).await?;

        Ok(ComputerList { computers, filter })
    }

    /// Get a computer by ID
    pub async fn get(&self, id: &str) -> Result<Computer> {
        self.repo.get_computer(id).await
    }

    /// Create a new computer
    pub async fn create(&self, req: CreateComputerRequest) -> Result<Computer> {
        // Validate before anything is written
        validate_name(&req.name)?;

        tracing::info!("Creating computer: {} ({})", req.name, req.year);

        let computer = self.repo.create_computer(req).await?;

        tracing::info!("Computer created successfully: {}", computer.id);

        Ok(computer)
    }

    /// Replace a computer with the submitted record.
    ///
    /// Submitting a record whose id matches nothing leaves the store unchanged.
    pub async fn update(&self, computer: Computer) -> Result<()> {
        validate_name(&computer.name)?;

        tracing::debug!("Updating computer: {}", computer.id);

        let replaced = self.repo.update_computer(&computer).await?;
        if replaced == 0 {
            tracing::info!("No computer to update for id {}", computer.id);
        }

        Ok(())
    }

    /// Delete a computer. Its image, if any, stays in the bucket.
    pub async fn delete(&self, id: &str) -> Result<()> {
        tracing::info!("Deleting computer: {}", id);

        self.repo.delete_computer(id).await?;

        tracing::info!("Computer deleted successfully: {}", id);

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidInput("name is required".to_string()));
    }
    Ok(())
}
