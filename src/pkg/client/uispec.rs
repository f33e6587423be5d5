use askama::Template;

#[derive(Template)]
#[template(path = "form.html")]
pub struct PredictForm<'a> {
    pub service_name: &'a str,
    pub api_url: &'a str,
    pub posted_year: i32,
}

#[derive(Template)]
#[template(path = "estimate.html")]
pub struct SalaryEstimate {
    pub salary: String,
    pub normalized_experience: Option<String>,
}

#[derive(Template)]
#[template(path = "estimate_error.html")]
pub struct EstimateError {
    pub message: String,
    pub detail: Option<String>,
}
