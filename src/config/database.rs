use tracing::info;

use crate::config::settings::Settings;
use crate::modules::survey::crud::{CrudError, SurveyCrud};

/// Opens the survey database and creates its table if needed.
pub fn connect(settings: &Settings) -> Result<SurveyCrud, CrudError> {
    let crud = SurveyCrud::new(&settings.database_path)?;
    info!(path = %settings.database_path.display(), "survey database ready");
    Ok(crud)
}
