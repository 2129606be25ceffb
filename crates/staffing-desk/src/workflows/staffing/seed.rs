//! Demo dataset loaded at start-up when `APP_SEED_DEMO` is enabled.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

use super::domain::{
    Application, ApplicationId, ApplicationStatus, HistoryId, Job, JobDetails, JobId, JobStatus,
    JobTemplate, Message, MessageId, Participant, SectionCode, TemplateId, WorkHistory,
    WorkStatus, Worker, WorkerId, WorkerLevel,
};
use super::store::StaffingStore;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn instant(month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

pub fn demo_store() -> StaffingStore {
    StaffingStore::new(workers(), templates(), jobs(), messages(), history())
}

#[allow(clippy::too_many_arguments)]
fn worker(
    id: &str,
    name: &str,
    email: &str,
    phone: &str,
    level: WorkerLevel,
    group: &str,
    totals: (f64, f64),
    joined: NaiveDate,
) -> Worker {
    Worker {
        id: WorkerId::from(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        level,
        group: group.to_string(),
        total_hours: totals.0,
        total_earnings: totals.1,
        joined_date: joined,
    }
}

fn workers() -> Vec<Worker> {
    vec![
        worker(
            "W001",
            "田中 太郎",
            "tanaka@example.com",
            "090-1234-5678",
            WorkerLevel::Intermediate,
            "宴会チーム",
            (120.0, 144_000.0),
            date(2025, 4, 1),
        ),
        worker(
            "W002",
            "佐藤 花子",
            "sato@example.com",
            "090-2345-6789",
            WorkerLevel::Expert,
            "宴会チーム",
            (240.0, 312_000.0),
            date(2024, 10, 15),
        ),
        worker(
            "W003",
            "鈴木 一郎",
            "suzuki@example.com",
            "090-3456-7890",
            WorkerLevel::Beginner,
            "客室チーム",
            (16.0, 17_600.0),
            date(2026, 1, 5),
        ),
        worker(
            "W004",
            "高橋 美咲",
            "takahashi@example.com",
            "090-4567-8901",
            WorkerLevel::Favorite,
            "調理チーム",
            (180.0, 225_000.0),
            date(2025, 1, 20),
        ),
        worker(
            "W005",
            "伊藤 健太",
            "ito@example.com",
            "090-5678-9012",
            WorkerLevel::Intermediate,
            "客室チーム",
            (64.0, 72_000.0),
            date(2025, 8, 1),
        ),
    ]
}

fn templates() -> Vec<JobTemplate> {
    vec![
        JobTemplate {
            id: TemplateId::from("T001"),
            name: "宴会サービス".to_string(),
            category: "宴会".to_string(),
            base_salary: 1200,
            break_time: 60,
            description: "宴会場での料理提供・ドリンクサービス".to_string(),
            description_images: Vec::new(),
            created_at: instant(1, 5, 9, 0),
            details: JobDetails {
                working_hours: Some("17:00-22:00".to_string()),
                section_code: Some(SectionCode::Banquet),
                precautions: Some("髪は必ずまとめてください".to_string()),
                belongings: Some("黒い靴・筆記用具".to_string()),
                workplace_address: Some("東京都千代田区丸の内1-1-1".to_string()),
                emergency_contact: Some("03-1234-5678".to_string()),
                overtime_allowance: Some(25),
                late_night_allowance: Some(25),
            },
        },
        JobTemplate {
            id: TemplateId::from("T002"),
            name: "ルーム清掃".to_string(),
            category: "清掃".to_string(),
            base_salary: 1100,
            break_time: 45,
            description: "客室の清掃・ベッドメイキング".to_string(),
            description_images: Vec::new(),
            created_at: instant(1, 6, 9, 0),
            details: JobDetails {
                working_hours: Some("10:00-15:00".to_string()),
                section_code: Some(SectionCode::RoomCleaning),
                belongings: Some("動きやすい服装".to_string()),
                ..JobDetails::default()
            },
        },
        JobTemplate {
            id: TemplateId::from("T003"),
            name: "調理補助".to_string(),
            category: "調理".to_string(),
            base_salary: 1250,
            break_time: 60,
            description: "厨房での仕込み・盛り付け補助".to_string(),
            description_images: Vec::new(),
            created_at: instant(1, 8, 9, 0),
            details: JobDetails {
                section_code: Some(SectionCode::KitchenAssistant),
                precautions: Some("爪は短く切ってください".to_string()),
                ..JobDetails::default()
            },
        },
    ]
}

fn application(
    job: &str,
    seq: u32,
    worker: &str,
    name: &str,
    status: ApplicationStatus,
    applied_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
) -> Application {
    Application {
        id: ApplicationId(format!("{job}-A{seq:03}")),
        job_id: JobId::from(job),
        worker_id: WorkerId::from(worker),
        worker_name: name.to_string(),
        status,
        applied_at,
        approved_at,
    }
}

struct JobSeed<'a> {
    id: &'a str,
    template: &'a JobTemplate,
    day: NaiveDate,
    hours: (NaiveTime, NaiveTime),
    location: &'a str,
    max_workers: u32,
    current_workers: u32,
    status: JobStatus,
    visibility: WorkerLevel,
    applications: Vec<Application>,
}

impl JobSeed<'_> {
    fn build(self) -> Job {
        let template = self.template;
        Job {
            id: JobId::from(self.id),
            template_id: Some(template.id.clone()),
            title: template.name.clone(),
            category: template.category.clone(),
            date: self.day,
            start_time: self.hours.0,
            end_time: self.hours.1,
            location: self.location.to_string(),
            salary: template.base_salary,
            break_time: template.break_time,
            max_workers: self.max_workers,
            current_workers: self.current_workers,
            status: self.status,
            visibility_level: self.visibility,
            description: template.description.clone(),
            description_images: Vec::new(),
            applications: self.applications,
            details: template.details.clone(),
            implementation_date: Some(self.day.and_time(self.hours.0)),
            application_deadline: None,
            recruitment_count: Some(self.max_workers),
            document_files: Vec::new(),
        }
    }
}

fn jobs() -> Vec<Job> {
    let templates = templates();
    let banquet = &templates[0];
    let cleaning = &templates[1];
    let kitchen = &templates[2];

    let seeds = vec![
        JobSeed {
            id: "J001",
            template: banquet,
            day: date(2026, 2, 1),
            hours: (time(17, 0), time(22, 0)),
            location: "本館 2F 鳳凰の間",
            max_workers: 5,
            current_workers: 2,
            status: JobStatus::Open,
            visibility: WorkerLevel::All,
            applications: vec![
                application(
                    "J001",
                    1,
                    "W001",
                    "田中 太郎",
                    ApplicationStatus::Applied,
                    instant(1, 20, 10, 0),
                    None,
                ),
                application(
                    "J001",
                    2,
                    "W002",
                    "佐藤 花子",
                    ApplicationStatus::Approved,
                    instant(1, 19, 9, 30),
                    Some(instant(1, 21, 14, 0)),
                ),
            ],
        },
        JobSeed {
            id: "J002",
            template: banquet,
            day: date(2026, 2, 3),
            hours: (time(11, 0), time(15, 0)),
            location: "別館 1F 桜の間",
            max_workers: 3,
            current_workers: 0,
            status: JobStatus::Open,
            visibility: WorkerLevel::Expert,
            applications: Vec::new(),
        },
        JobSeed {
            id: "J003",
            template: cleaning,
            day: date(2026, 2, 4),
            hours: (time(10, 0), time(15, 0)),
            location: "本館 客室フロア",
            max_workers: 4,
            current_workers: 1,
            status: JobStatus::Open,
            visibility: WorkerLevel::Beginner,
            applications: vec![application(
                "J003",
                1,
                "W003",
                "鈴木 一郎",
                ApplicationStatus::Applied,
                instant(1, 23, 11, 0),
                None,
            )],
        },
        JobSeed {
            id: "J004",
            template: kitchen,
            day: date(2026, 1, 15),
            hours: (time(8, 0), time(14, 0)),
            location: "本館 B1 厨房",
            max_workers: 2,
            current_workers: 2,
            status: JobStatus::Completed,
            visibility: WorkerLevel::All,
            applications: vec![
                application(
                    "J004",
                    1,
                    "W004",
                    "高橋 美咲",
                    ApplicationStatus::Approved,
                    instant(1, 5, 8, 0),
                    Some(instant(1, 6, 10, 0)),
                ),
                application(
                    "J004",
                    2,
                    "W001",
                    "田中 太郎",
                    ApplicationStatus::Rejected,
                    instant(1, 5, 9, 0),
                    None,
                ),
            ],
        },
        JobSeed {
            id: "J005",
            template: kitchen,
            day: date(2026, 2, 10),
            hours: (time(8, 0), time(13, 0)),
            location: "本館 B1 厨房",
            max_workers: 2,
            current_workers: 0,
            status: JobStatus::Open,
            visibility: WorkerLevel::Favorite,
            applications: Vec::new(),
        },
        JobSeed {
            id: "J006",
            template: banquet,
            day: date(2026, 1, 30),
            hours: (time(17, 0), time(21, 0)),
            location: "屋上 ビアガーデン",
            max_workers: 6,
            current_workers: 0,
            status: JobStatus::Cancelled,
            visibility: WorkerLevel::All,
            applications: Vec::new(),
        },
        JobSeed {
            id: "J007",
            template: cleaning,
            day: date(2026, 2, 6),
            hours: (time(10, 0), time(15, 0)),
            location: "別館 客室フロア",
            max_workers: 3,
            current_workers: 0,
            status: JobStatus::Closed,
            visibility: WorkerLevel::All,
            applications: Vec::new(),
        },
    ];

    seeds.into_iter().map(JobSeed::build).collect()
}

#[allow(clippy::too_many_arguments)]
fn message(
    id: &str,
    from: Participant,
    to: Participant,
    subject: &str,
    content: &str,
    timestamp: DateTime<Utc>,
    read: bool,
    job: Option<&str>,
) -> Message {
    Message {
        id: MessageId::from(id),
        from,
        to,
        subject: subject.to_string(),
        content: content.to_string(),
        timestamp,
        read,
        job_id: job.map(JobId::from),
    }
}

fn messages() -> Vec<Message> {
    let admin = || Participant::Admin;
    let worker = |id: &str| Participant::Worker(WorkerId::from(id));

    vec![
        message(
            "M001",
            admin(),
            worker("W001"),
            "勤務日程のご連絡",
            "来週の勤務日程が確定しました。確認をお願いします。",
            instant(1, 20, 10, 0),
            false,
            Some("J001"),
        ),
        message(
            "M002",
            worker("W001"),
            admin(),
            "Re: 勤務日程のご連絡",
            "承知しました。確認いたします。",
            instant(1, 20, 10, 30),
            true,
            Some("J001"),
        ),
        message(
            "M003",
            worker("W001"),
            admin(),
            "勤務時間の変更について",
            "2月1日の勤務ですが、都合により時間の変更は可能でしょうか。",
            instant(1, 22, 9, 0),
            false,
            Some("J001"),
        ),
        message(
            "M004",
            admin(),
            worker("W001"),
            "研修のお知らせ",
            "新しい宴会マニュアルを配布します。",
            instant(1, 22, 12, 0),
            false,
            None,
        ),
        message(
            "M005",
            admin(),
            worker("W002"),
            "応募承認のお知らせ",
            "ご応募いただいた案件が承認されました。当日は9時集合でお願いします。",
            instant(1, 21, 14, 0),
            true,
            Some("J001"),
        ),
        message(
            "M006",
            worker("W002"),
            admin(),
            "Re: 応募承認のお知らせ",
            "ありがとうございます。当日よろしくお願いいたします。",
            instant(1, 21, 14, 30),
            true,
            Some("J001"),
        ),
        message(
            "M007",
            worker("W003"),
            admin(),
            "ご挨拶",
            "初めまして。登録したばかりですが、案件に応募させていただきました。",
            instant(1, 23, 11, 0),
            false,
            Some("J003"),
        ),
        message(
            "M008",
            admin(),
            worker("W004"),
            "来月のシフト希望",
            "いつもご協力ありがとうございます。来月のシフト希望がありましたらお知らせください。",
            instant(1, 19, 16, 0),
            true,
            None,
        ),
        message(
            "M009",
            worker("W004"),
            admin(),
            "Re: 来月のシフト希望",
            "来月は週3日程度で調整可能です。詳細はまた連絡します。",
            instant(1, 19, 17, 0),
            true,
            None,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn entry(
    id: &str,
    job: &str,
    worker: &str,
    title: &str,
    day: NaiveDate,
    hours: f64,
    earnings: f64,
    status: WorkStatus,
) -> WorkHistory {
    WorkHistory {
        id: HistoryId::from(id),
        job_id: JobId::from(job),
        worker_id: WorkerId::from(worker),
        job_title: title.to_string(),
        date: day,
        hours,
        earnings,
        status,
    }
}

fn history() -> Vec<WorkHistory> {
    vec![
        entry(
            "H001",
            "J004",
            "W004",
            "調理補助",
            date(2026, 1, 15),
            5.0,
            6250.0,
            WorkStatus::Completed,
        ),
        entry(
            "H002",
            "J090",
            "W001",
            "宴会サービス",
            date(2026, 1, 10),
            4.0,
            4800.0,
            WorkStatus::Completed,
        ),
        entry(
            "H003",
            "J091",
            "W001",
            "宴会サービス",
            date(2026, 1, 17),
            4.5,
            5400.0,
            WorkStatus::Completed,
        ),
        entry(
            "H004",
            "J091",
            "W002",
            "宴会サービス",
            date(2026, 1, 17),
            4.5,
            5400.0,
            WorkStatus::Completed,
        ),
        entry(
            "H005",
            "J092",
            "W002",
            "宴会サービス",
            date(2025, 12, 24),
            6.0,
            7200.0,
            WorkStatus::Completed,
        ),
        entry(
            "H006",
            "J093",
            "W003",
            "ルーム清掃",
            date(2026, 1, 12),
            4.25,
            4675.0,
            WorkStatus::Completed,
        ),
        entry(
            "H007",
            "J094",
            "W005",
            "ルーム清掃",
            date(2026, 1, 25),
            4.25,
            4675.0,
            WorkStatus::Incomplete,
        ),
    ]
}
