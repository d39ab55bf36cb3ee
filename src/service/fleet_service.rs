use std::sync::Arc;

use crate::{
    domain::Car,
    error::{AppError, Result},
    repository::{CarRepository, CategoryRepository},
};

/// Read-only fleet queries for the public site.
pub struct FleetService {
    car_repo: Arc<dyn CarRepository>,
    category_repo: Arc<dyn CategoryRepository>,
}

impl FleetService {
    pub fn new(car_repo: Arc<dyn CarRepository>, category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { car_repo, category_repo }
    }

    /// Bookable cars, optionally restricted to an active category.
    pub async fn available_cars(&self, category_slug: Option<&str>) -> Result<Vec<Car>> {
        let category_id = match category_slug {
            Some(slug) => {
                let category = self.category_repo.find_by_slug(slug).await?
                    .filter(|c| c.is_active)
                    .ok_or_else(|| AppError::NotFound(format!("Category '{}' not found", slug)))?;
                Some(category.id)
            }
            None => None,
        };

        self.car_repo.list_bookable(category_id).await
    }

    /// Detail page lookup. Cars pulled from the fleet are hidden.
    pub async fn car_by_slug(&self, slug: &str) -> Result<Car> {
        self.car_repo.find_by_slug(slug).await?
            .filter(|c| c.is_active)
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))
    }
}
