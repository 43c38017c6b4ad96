use anyhow::{Context, Result};
use platform_authz::Position;
use platform_db::SeaOrmStore;
use products_hr::{
    Employee, HrModule, NewEmployee, WageSettings, store::EmployeeDirectory,
};
use rust_decimal::Decimal;
use tracing::info;

const DEMO_STORES: [(&str, &str); 2] = [("kadikoy", "istanbul-anadolu"), ("besiktas", "istanbul-avrupa")];

/// One approved employee per position, spread over two demo stores, with a
/// salary on every record. Does nothing when the directory is not empty.
pub async fn seed_demo(hr: &HrModule<SeaOrmStore>) -> Result<Vec<Employee>> {
    let existing = hr.store().employees(None).await?;
    if !existing.is_empty() {
        info!(count = existing.len(), "directory already populated; seed skipped");
        return Ok(existing);
    }

    let mut seeded = Vec::with_capacity(Position::ALL.len());
    for (index, position) in Position::ALL.into_iter().enumerate() {
        let (store_id, region) = DEMO_STORES[index % DEMO_STORES.len()];
        let employee = hr
            .store()
            .register_employee(NewEmployee {
                full_name: format!("Demo {}", position.as_str()),
                phone: Some(format!("+90 555 000 00{index:02}")),
                store_id: store_id.to_string(),
                region: Some(region.to_string()),
                position: position.as_str().to_string(),
            })
            .await
            .with_context(|| format!("failed to register demo {position}"))?;
        hr.store().set_approved(employee.id, true).await?;
        let settings = WageSettings::new(Decimal::from(17_000), None, None)?;
        let employee = hr.save_wage_settings(employee.id, settings).await?;
        seeded.push(employee);
    }
    info!(count = seeded.len(), "demo employees seeded");
    Ok(seeded)
}
