//! Mapper implementations for converting between DTOs and contract models

use super::dto::*;
use crate::contract;

impl From<contract::SettingsRecord> for SettingsDto {
    fn from(record: contract::SettingsRecord) -> Self {
        Self {
            minimum_role: record.minimum_role,
            submission_manager_role: record.submission_manager_role,
            debug_mode: record.debug_mode,
            log_entries: record.log_entries,
            ms_show_all_achievements: record.ms_show_all_achievements,
            remove_data_on_uninstall: record.remove_data_on_uninstall,
            submission_email: record.submission_email,
            submission_email_addresses: record.submission_email_addresses,
            licenses: record.licenses,
            extra: record.extra,
        }
    }
}

impl From<UpdateSettingsRequest> for contract::SettingsInput {
    fn from(req: UpdateSettingsRequest) -> Self {
        Self {
            fields: req.fields,
            licenses: req.licenses,
        }
    }
}
