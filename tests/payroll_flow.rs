use platform_authz::Position;
use rust_decimal::Decimal;
use serde_json::json;
use staff_tests::{TestApp, decimal, error_code};

const SUBMIT: &str = r#"
    mutation($date: NaiveDate!, $hours: Decimal!, $reason: String, $employeeId: UUID) {
        submitOvertime(date: $date, hours: $hours, reason: $reason, employeeId: $employeeId) {
            id employeeId status createdBy
        }
    }"#;

const REVIEW: &str = r#"
    mutation($id: UUID!, $approve: Boolean!) {
        reviewOvertime(id: $id, approve: $approve) { status reviewedBy }
    }"#;

const SHIFT: &str = r#"
    mutation($employeeId: UUID!, $workDate: NaiveDate!, $start: NaiveTime, $end: NaiveTime) {
        upsertShiftDay(employeeId: $employeeId, workDate: $workDate, startTime: $start, endTime: $end) {
            weekStart offDay workedHours
        }
    }"#;

const PAYROLL: &str = r#"
    query($id: UUID!, $month: Int!, $year: Int!) {
        payroll(employeeId: $id, month: $month, year: $year) {
            currency baseSalary approvedOvertimeHours offDayHours
            hourlyRate overtimeRate offDayRate overtimePay offDayPay totalPay
        }
    }"#;

#[tokio::test]
async fn overtime_and_sunday_shifts_flow_into_payroll() {
    let app = TestApp::seeded().await.unwrap();
    let hr = app.employee(Position::InsanKaynaklari);
    let barista = app.employee(Position::Barista);
    let deputy = app.employee(Position::MudurYardimcisi);
    let other_store = app.employee(Position::Supervisor);

    let data = app
        .data(
            hr,
            r#"mutation($id: UUID!) {
                updateWageProfile(employeeId: $id, baseSalary: "17000") {
                    baseSalary monthlyWorkDays dailyWorkHours
                }
            }"#,
            json!({ "id": barista.id }),
        )
        .await;
    let wage = &data["updateWageProfile"];
    assert_eq!(decimal(&wage["baseSalary"]), Decimal::from(17_000));
    assert_eq!(wage["monthlyWorkDays"], json!(26));
    assert_eq!(decimal(&wage["dailyWorkHours"]), Decimal::from(8));

    let data = app
        .data(
            barista,
            SUBMIT,
            json!({ "date": "2024-06-04", "hours": "10", "reason": "inventory" }),
        )
        .await;
    assert_eq!(data["submitOvertime"]["status"], json!("PENDING"));
    assert_eq!(data["submitOvertime"]["createdBy"], json!(barista.id));
    let approved_id = data["submitOvertime"]["id"].clone();
    app.data(barista, SUBMIT, json!({ "date": "2024-06-05", "hours": "3" }))
        .await;

    let data = app
        .data(
            barista,
            "{ overtimeRequests(month: 6, year: 2024) { id } }",
            json!({}),
        )
        .await;
    assert_eq!(data["overtimeRequests"].as_array().unwrap().len(), 2);

    let response = app
        .execute(other_store, REVIEW, json!({ "id": approved_id, "approve": true }))
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));

    let data = app
        .data(deputy, REVIEW, json!({ "id": approved_id, "approve": true }))
        .await;
    assert_eq!(data["reviewOvertime"]["status"], json!("APPROVED"));
    assert_eq!(data["reviewOvertime"]["reviewedBy"], json!(deputy.id));

    let response = app
        .execute(deputy, REVIEW, json!({ "id": approved_id, "approve": false }))
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_INPUT"));

    let data = app
        .data(
            deputy,
            "{ overtimeRequests(status: APPROVED) { employeeId } }",
            json!({}),
        )
        .await;
    assert_eq!(
        data["overtimeRequests"],
        json!([{ "employeeId": barista.id }])
    );

    let data = app
        .data(
            deputy,
            SHIFT,
            json!({
                "employeeId": barista.id,
                "workDate": "2024-06-09",
                "start": "09:00:00",
                "end": "17:00:00",
            }),
        )
        .await;
    assert_eq!(data["upsertShiftDay"]["weekStart"], json!("2024-06-03"));
    assert_eq!(data["upsertShiftDay"]["offDay"], json!(true));
    assert_eq!(decimal(&data["upsertShiftDay"]["workedHours"]), Decimal::from(8));

    let data = app
        .data(
            deputy,
            SHIFT,
            json!({
                "employeeId": barista.id,
                "workDate": "2024-06-10",
                "start": "09:00:00",
                "end": "17:00:00",
            }),
        )
        .await;
    assert_eq!(data["upsertShiftDay"]["offDay"], json!(false));

    let data = app
        .data(
            hr,
            PAYROLL,
            json!({ "id": barista.id, "month": 6, "year": 2024 }),
        )
        .await;
    let payroll = &data["payroll"];
    assert_eq!(payroll["currency"], json!("TRY"));
    assert_eq!(decimal(&payroll["approvedOvertimeHours"]), Decimal::from(10));
    assert_eq!(decimal(&payroll["offDayHours"]), Decimal::from(8));
    assert_eq!(decimal(&payroll["hourlyRate"]), Decimal::new(8_173, 2));
    assert_eq!(decimal(&payroll["overtimeRate"]), Decimal::new(12_260, 2));
    assert_eq!(decimal(&payroll["offDayRate"]), Decimal::new(16_346, 2));
    assert_eq!(decimal(&payroll["overtimePay"]), Decimal::new(122_596, 2));
    assert_eq!(decimal(&payroll["offDayPay"]), Decimal::new(130_769, 2));
    assert_eq!(decimal(&payroll["totalPay"]), Decimal::new(1_953_365, 2));

    let data = app
        .data(
            hr,
            PAYROLL,
            json!({ "id": barista.id, "month": 7, "year": 2024 }),
        )
        .await;
    assert_eq!(decimal(&data["payroll"]["totalPay"]), Decimal::from(17_000));
}

#[tokio::test]
async fn invalid_inputs_are_reported() {
    let app = TestApp::seeded().await.unwrap();
    let hr = app.employee(Position::InsanKaynaklari);
    let barista = app.employee(Position::Barista);
    let wage = r#"mutation($id: UUID!, $salary: Decimal!, $days: Int) {
        updateWageProfile(employeeId: $id, baseSalary: $salary, monthlyWorkDays: $days) { baseSalary }
    }"#;

    for variables in [
        json!({ "id": barista.id, "salary": "0" }),
        json!({ "id": barista.id, "salary": "-5" }),
        json!({ "id": barista.id, "salary": "17000", "days": 0 }),
        json!({ "id": barista.id, "salary": "17000", "days": 32 }),
    ] {
        let response = app.execute(hr, wage, variables.clone()).await;
        assert_eq!(
            error_code(&response).as_deref(),
            Some("INVALID_INPUT"),
            "{variables}"
        );
    }

    for hours in ["0", "12.5", "0.001"] {
        let response = app
            .execute(barista, SUBMIT, json!({ "date": "2024-06-04", "hours": hours }))
            .await;
        assert_eq!(error_code(&response).as_deref(), Some("INVALID_INPUT"), "{hours}");
    }

    let hours = r#"mutation($id: UUID!, $salary: Decimal!, $hours: Decimal) {
        updateWageProfile(employeeId: $id, baseSalary: $salary, dailyWorkHours: $hours) { baseSalary }
    }"#;
    for variables in [
        json!({ "id": barista.id, "salary": "17000", "hours": "0.001" }),
        json!({ "id": barista.id, "salary": "0.001" }),
        json!({ "id": barista.id, "salary": "17000.005" }),
    ] {
        let response = app.execute(hr, hours, variables.clone()).await;
        assert_eq!(
            error_code(&response).as_deref(),
            Some("INVALID_INPUT"),
            "{variables}"
        );
    }
    let data = app
        .data(hr, r#"{ employees(storeId: "besiktas") { id } }"#, json!({}))
        .await;
    assert_eq!(data["employees"].as_array().unwrap().len(), 4);
    let data = app
        .data(
            hr,
            PAYROLL,
            json!({ "id": barista.id, "month": 6, "year": 2024 }),
        )
        .await;
    assert_eq!(decimal(&data["payroll"]["baseSalary"]), Decimal::from(17_000));

    let newcomer = app.hire("besiktas", "barista", true).await.unwrap();
    let response = app
        .execute(
            hr,
            PAYROLL,
            json!({ "id": newcomer.id, "month": 6, "year": 2024 }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_INPUT"));

    let response = app
        .execute(
            hr,
            PAYROLL,
            json!({ "id": uuid::Uuid::new_v4(), "month": 6, "year": 2024 }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("NOT_FOUND"));

    let response = app
        .execute(
            hr,
            PAYROLL,
            json!({ "id": barista.id, "month": 13, "year": 2024 }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_INPUT"));
}

#[tokio::test]
async fn filing_on_behalf_needs_approval_rights_in_the_same_store() {
    let app = TestApp::seeded().await.unwrap();
    let barista = app.employee(Position::Barista);
    let deputy = app.employee(Position::MudurYardimcisi);
    let waiter = app.employee(Position::ServisPersoneli);
    let supervisor = app.employee(Position::Supervisor);

    let data = app
        .data(
            deputy,
            SUBMIT,
            json!({ "date": "2024-06-04", "hours": "2", "employeeId": barista.id }),
        )
        .await;
    assert_eq!(data["submitOvertime"]["employeeId"], json!(barista.id));
    assert_eq!(data["submitOvertime"]["createdBy"], json!(deputy.id));

    let response = app
        .execute(
            deputy,
            SUBMIT,
            json!({ "date": "2024-06-04", "hours": "2", "employeeId": supervisor.id }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));

    let regional = app.employee(Position::BolgeMuduru);
    let response = app
        .execute(
            deputy,
            SUBMIT,
            json!({ "date": "2024-06-04", "hours": "2", "employeeId": regional.id }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));

    let response = app
        .execute(
            waiter,
            SUBMIT,
            json!({ "date": "2024-06-04", "hours": "2", "employeeId": supervisor.id }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));

    let response = app
        .execute(
            waiter,
            SHIFT,
            json!({ "employeeId": waiter.id, "workDate": "2024-06-09" }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));
}

#[tokio::test]
async fn attendance_is_recorded_for_the_viewer() {
    let app = TestApp::seeded().await.unwrap();
    let barista = app.employee(Position::Barista);
    let record = r#"mutation($date: NaiveDate!, $in: NaiveTime!, $out: NaiveTime) {
        recordAttendance(workDate: $date, checkIn: $in, checkOut: $out) { employeeId checkOut }
    }"#;

    let data = app
        .data(
            barista,
            record,
            json!({ "date": "2024-06-04", "in": "09:00:00", "out": "17:30:00" }),
        )
        .await;
    assert_eq!(data["recordAttendance"]["employeeId"], json!(barista.id));
    assert_eq!(data["recordAttendance"]["checkOut"], json!("17:30:00"));

    let response = app
        .execute(
            barista,
            record,
            json!({ "date": "2024-06-05", "in": "17:00:00", "out": "09:00:00" }),
        )
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("INVALID_INPUT"));

    let data = app
        .data(
            barista,
            "{ attendance(month: 6, year: 2024) { workDate checkIn } }",
            json!({}),
        )
        .await;
    assert_eq!(
        data["attendance"],
        json!([{ "workDate": "2024-06-04", "checkIn": "09:00:00" }])
    );
}

#[tokio::test]
async fn approvers_cannot_review_requests_they_own_or_filed() {
    let app = TestApp::seeded().await.unwrap();
    let hr = app.employee(Position::InsanKaynaklari);
    let supervisor = app.employee(Position::Supervisor);
    let store_manager = app.employee(Position::MagazaMuduru);
    let deputy = app.employee(Position::MudurYardimcisi);
    let barista = app.employee(Position::Barista);

    let data = app
        .data(supervisor, SUBMIT, json!({ "date": "2024-06-04", "hours": "12" }))
        .await;
    let own_id = data["submitOvertime"]["id"].clone();
    let response = app
        .execute(supervisor, REVIEW, json!({ "id": own_id, "approve": true }))
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));

    let data = app
        .data(
            hr,
            PAYROLL,
            json!({ "id": supervisor.id, "month": 6, "year": 2024 }),
        )
        .await;
    assert_eq!(decimal(&data["payroll"]["approvedOvertimeHours"]), Decimal::ZERO);

    let data = app
        .data(store_manager, REVIEW, json!({ "id": own_id, "approve": true }))
        .await;
    assert_eq!(data["reviewOvertime"]["status"], json!("APPROVED"));

    let data = app
        .data(
            deputy,
            SUBMIT,
            json!({ "date": "2024-06-05", "hours": "3", "employeeId": barista.id }),
        )
        .await;
    let filed_id = data["submitOvertime"]["id"].clone();
    let response = app
        .execute(deputy, REVIEW, json!({ "id": filed_id, "approve": true }))
        .await;
    assert_eq!(error_code(&response).as_deref(), Some("FORBIDDEN"));
}
