//! Input validation utilities

use common::models::{CreateJobRequest, DEFAULT_SALARY_TYPE, NewJob, Salary};

/// Validate a create-job payload
///
/// Fields are checked in a fixed order and the first missing one is reported
/// by name.
pub fn validate_new_job(request: &CreateJobRequest) -> Result<NewJob, String> {
    let title = required_text(request.title.as_deref(), "title is required")?;
    let description = required_text(request.description.as_deref(), "description is required")?;
    let location = required_text(request.location.as_deref(), "location is required")?;
    let salary = validate_salary(request.salary.as_ref())?;

    let job_type = request
        .job_type
        .as_deref()
        .map(clean_list)
        .filter(|types| !types.is_empty())
        .ok_or("jobType is required")?;
    let tags = request
        .tags
        .as_deref()
        .map(clean_list)
        .ok_or("tags are required")?;
    let skills = request
        .skills
        .as_deref()
        .map(clean_list)
        .ok_or("skills are required")?;

    let salary_type = request
        .salary_type
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(DEFAULT_SALARY_TYPE)
        .to_string();

    Ok(NewJob {
        title,
        description,
        location,
        salary,
        salary_type,
        negotiable: request.negotiable.unwrap_or(false),
        job_type,
        tags,
        skills,
    })
}

fn required_text(value: Option<&str>, message: &str) -> Result<String, String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| message.to_string())
}

fn validate_salary(salary: Option<&Salary>) -> Result<f64, String> {
    salary
        .and_then(Salary::amount)
        .filter(|amount| *amount != 0.0)
        .ok_or_else(|| "salary is required".to_string())
}

fn clean_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .collect()
}
