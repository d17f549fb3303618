use super::{contains_ignore_case, is_blank, require, ListController, ListResource};
use crate::api::BatchTypeGateway;
use crate::error::ConsoleError;
use crate::models::{BatchType, BatchTypeRequest};

pub type BatchTypeController<G = BatchTypeGateway> = ListController<BatchType, G>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchTypeCriteria {
    pub batch_type: String,
}

impl ListResource for BatchType {
    type Criteria = BatchTypeCriteria;

    fn matches(&self, criteria: &BatchTypeCriteria) -> bool {
        contains_ignore_case(&self.batch_type, &criteria.batch_type)
    }

    fn validate(form: &BatchTypeRequest) -> Result<(), ConsoleError> {
        require(!is_blank(&form.batch_type), "Batch type is required")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::controller;
    use crate::controller::{LoadState, ModalState};

    #[tokio::test]
    async fn empty_collection_loads_cleanly() {
        let mut controller = controller::<BatchType>(vec![]);
        controller.load().await.unwrap();

        assert_eq!(controller.state(), LoadState::Loaded);
        assert!(controller.records().is_empty());
        assert!(controller.groups().is_empty());
        assert_eq!(controller.error_message(), None);
    }

    #[tokio::test]
    async fn edit_keeps_section() {
        let record = BatchType {
            batch_type_id: 4,
            batch_type: "Export".to_string(),
            section: Some(3),
        };
        let mut controller = controller(vec![record.clone()]);
        controller.load().await.unwrap();
        controller.open_edit(&record);

        assert_eq!(controller.modal(), &ModalState::EditOpen(4));
        assert_eq!(controller.form().section, Some(3));
        controller.form_mut().batch_type.clear();
        assert_eq!(controller.submit().await.unwrap_err().to_string(), "Batch type is required");
    }

    #[tokio::test]
    async fn blank_type_is_rejected_before_any_request() {
        let mut controller = controller::<BatchType>(vec![]);
        controller.open_create();
        *controller.form_mut() = BatchTypeRequest {
            batch_type: String::new(),
            section: None,
        };

        let err = controller.submit().await.unwrap_err();
        assert_eq!(err.to_string(), "Batch type is required");
        assert_eq!(controller.error_message(), Some("Batch type is required"));
        assert_eq!(controller.modal(), &ModalState::CreateOpen);
        assert!(controller.gateway().calls().is_empty());
    }
}
