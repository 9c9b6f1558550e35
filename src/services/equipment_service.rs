// src/services/equipment_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EquipmentRepository, RequestRepository},
    models::equipment::{
        CreateEquipmentPayload, Equipment, EquipmentDetail, EquipmentStatus, UpdateEquipmentPayload,
    },
};

#[derive(Clone)]
pub struct EquipmentService {
    equipment_repo: EquipmentRepository,
    request_repo: RequestRepository,
}

impl EquipmentService {
    pub fn new(equipment_repo: EquipmentRepository, request_repo: RequestRepository) -> Self {
        Self {
            equipment_repo,
            request_repo,
        }
    }

    pub async fn create_equipment(
        &self,
        payload: &CreateEquipmentPayload,
    ) -> Result<Equipment, AppError> {
        self.equipment_repo.create(payload).await
    }

    pub async fn list_equipment(
        &self,
        search: Option<&str>,
        status: Option<EquipmentStatus>,
        category: Option<&str>,
    ) -> Result<Vec<Equipment>, AppError> {
        self.equipment_repo.list(search, status, category).await
    }

    // Detalhe com o histórico de requisições do equipamento
    pub async fn get_detail(&self, id: Uuid) -> Result<EquipmentDetail, AppError> {
        let equipment = self
            .equipment_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Equipamento {}", id)))?;

        let requests = self.request_repo.list_for_equipment(id).await?;

        Ok(EquipmentDetail {
            equipment,
            requests,
        })
    }

    pub async fn update_equipment(
        &self,
        id: Uuid,
        payload: &UpdateEquipmentPayload,
    ) -> Result<Equipment, AppError> {
        self.equipment_repo
            .update_fields(id, payload)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Equipamento {}", id)))
    }

    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        self.equipment_repo.list_categories().await
    }
}
