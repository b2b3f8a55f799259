//! Command execution against the repository.

use chrono::Utc;
use uuid::Uuid;

use roster_core::employee::{Employee, EmployeeFields, UpdateEmployeeRequest};
use roster_core::repository::{EmployeeRepository, Outcome, RepositoryError};

use crate::cli::{Commands, OutputFormat};
use crate::output::{format_employees, format_output, print_employee};
use crate::state::AppState;

/// Runs one command, printing its result to stdout.
///
/// Each repository call gets its own operation context. Cache warnings are
/// already logged by the repository and do not change the exit status.
pub async fn run(
    command: Commands,
    format: OutputFormat,
    state: &AppState,
) -> Result<(), RepositoryError> {
    let repo = state.repo.as_ref();

    match command {
        Commands::Create {
            name,
            position,
            salary,
            hired_date,
        } => {
            let hired_date = hired_date.unwrap_or_else(|| Utc::now().date_naive());
            let fields = EmployeeFields::new(name, position, salary, hired_date);

            let id = settle(repo.create_employee(&state.operation_context(), &fields).await?);
            match format {
                OutputFormat::Json => {
                    println!("{}", format_output(&serde_json::json!({ "id": id }), format))
                }
                OutputFormat::Pretty => println!("Created employee {id}"),
            }
        }
        Commands::Get { id } => {
            let employee = settle(repo.get_employee(&state.operation_context(), id).await?);
            print_employee(&employee, format, None);
        }
        Commands::Update { id, changes } => {
            let request = UpdateEmployeeRequest::from(changes);
            let employee = update(repo, state, id, request).await?;
            print_employee(&employee, format, Some("Updated"));
        }
        Commands::Delete { id } => {
            settle(repo.delete_employee(&state.operation_context(), id).await?);
            match format {
                OutputFormat::Json => {
                    println!("{}", format_output(&serde_json::json!({ "deleted": id }), format))
                }
                OutputFormat::Pretty => println!("Deleted employee {id}"),
            }
        }
        Commands::List => {
            let employees = settle(repo.list_employees(&state.operation_context()).await?);
            match format {
                OutputFormat::Json => println!("{}", format_output(&employees, format)),
                OutputFormat::Pretty => println!("{}", format_employees(&employees)),
            }
        }
    }

    Ok(())
}

/// Applies a partial edit: reads the current record, patches its fields and
/// writes the full record back.
async fn update(
    repo: &dyn EmployeeRepository,
    state: &AppState,
    id: Uuid,
    request: UpdateEmployeeRequest,
) -> Result<Employee, RepositoryError> {
    let current = settle(repo.get_employee(&state.operation_context(), id).await?);

    if request.is_empty() {
        tracing::info!(employee_id = %id, "No fields to change");
        return Ok(current);
    }

    let mut fields = current.fields();
    request.apply_to(&mut fields);

    let updated = repo
        .update_employee(&state.operation_context(), id, &fields)
        .await?;
    Ok(settle(updated))
}

/// Unwraps an outcome, noting how many cache warnings it carried.
fn settle<T>(outcome: Outcome<T>) -> T {
    if !outcome.is_clean() {
        let stale = outcome.warnings.iter().filter(|w| w.may_be_stale()).count();
        if stale > 0 {
            tracing::info!(
                warnings = outcome.warnings.len(),
                stale_keys = stale,
                "Completed with cache warnings; cached data may be stale until TTL expiry"
            );
        } else {
            tracing::info!(
                warnings = outcome.warnings.len(),
                "Completed with cache read warnings; served from the store"
            );
        }
    }
    outcome.into_value()
}

#[cfg(all(test, not(feature = "redis")))]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::config::Config;

    async fn test_state() -> AppState {
        let config = Config {
            sqlite_path: ":memory:".to_string(),
            ..Config::default()
        };
        AppState::open(&config).await.unwrap()
    }

    async fn create(state: &AppState) -> Uuid {
        let fields = EmployeeFields::new(
            "A",
            "B",
            100,
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        );
        state
            .repo
            .create_employee(&state.operation_context(), &fields)
            .await
            .unwrap()
            .value
    }

    #[tokio::test]
    async fn test_update_applies_patch_only() {
        let state = test_state().await;
        let id = create(&state).await;

        let updated = update(
            state.repo.as_ref(),
            &state,
            id,
            UpdateEmployeeRequest::new().with_salary(150),
        )
        .await
        .unwrap();

        assert_eq!(updated.salary, 150);
        assert_eq!(updated.name, "A");
        assert_eq!(updated.position, "B");
        assert!(updated.updated_at.is_some());
        state.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_update_leaves_record_untouched() {
        let state = test_state().await;
        let id = create(&state).await;

        let current = update(state.repo.as_ref(), &state, id, UpdateEmployeeRequest::new())
            .await
            .unwrap();

        assert!(current.updated_at.is_none());
        state.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let state = test_state().await;
        let id = Uuid::new_v4();

        let result = update(
            state.repo.as_ref(),
            &state,
            id,
            UpdateEmployeeRequest::new().with_name("C"),
        )
        .await;

        assert_eq!(result, Err(RepositoryError::NotFound { id }));
        state.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_run_delete_then_get_fails() {
        let state = test_state().await;
        let id = create(&state).await;

        run(Commands::Delete { id }, OutputFormat::Json, &state)
            .await
            .unwrap();
        let result = run(Commands::Get { id }, OutputFormat::Json, &state).await;

        assert_eq!(result, Err(RepositoryError::NotFound { id }));
        state.close().await.unwrap();
    }
}
