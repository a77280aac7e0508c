//! Mapper between shared attendance DTOs and domain occurrence models.

use crate::domain::commands::attendance::{ScheduleDateResult, TodayClassItem, TodayResult};
use crate::domain::models::attendance::{
    AttendanceRecord as DomainRecord, ClassKind as DomainKind, ClassStatus as DomainStatus,
    ExtraClassTimings,
};
use crate::io::rest::mappers::course_mapper::weekday_name;
use shared::{
    AttendanceRecord, ClassKind, ClassStatus, CreateExtraClassRequest, ScheduleDateResponse,
    TodayClass, TodayResponse,
};

pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn status_to_domain(status: ClassStatus) -> DomainStatus {
        match status {
            ClassStatus::Unset => DomainStatus::Unset,
            ClassStatus::Present => DomainStatus::Present,
            ClassStatus::Absent => DomainStatus::Absent,
            ClassStatus::Cancelled => DomainStatus::Cancelled,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> ClassStatus {
        match status {
            DomainStatus::Unset => ClassStatus::Unset,
            DomainStatus::Present => ClassStatus::Present,
            DomainStatus::Absent => ClassStatus::Absent,
            DomainStatus::Cancelled => ClassStatus::Cancelled,
        }
    }

    pub fn kind_to_dto(kind: DomainKind) -> ClassKind {
        match kind {
            DomainKind::Regular => ClassKind::Regular,
            DomainKind::Extra => ClassKind::Extra,
        }
    }

    /// Converts a domain occurrence record to its DTO.
    pub fn record_to_dto(record: DomainRecord) -> AttendanceRecord {
        AttendanceRecord {
            id: record.id,
            course_id: record.course_id,
            schedule_id: record.schedule_id,
            date: record.date,
            start_time: record.start_time,
            end_time: record.end_time,
            kind: Self::kind_to_dto(record.kind),
            status: Self::status_to_dto(record.status),
        }
    }

    /// Converts an extra-class request DTO to the transient timings value.
    pub fn to_timings(request: &CreateExtraClassRequest) -> ExtraClassTimings {
        ExtraClassTimings {
            date: request.date,
            start_time: request.start_time,
            end_time: request.end_time,
        }
    }

    pub fn today_class_to_dto(item: TodayClassItem) -> TodayClass {
        TodayClass {
            course_id: item.course_id,
            course_name: item.course_name,
            schedule_id: item.schedule_id,
            record_id: item.record_id,
            start_time: item.start_time,
            end_time: item.end_time,
            kind: Self::kind_to_dto(item.kind),
            status: Self::status_to_dto(item.status),
        }
    }

    pub fn today_to_dto(result: TodayResult) -> TodayResponse {
        TodayResponse {
            date: result.date,
            weekday: weekday_name(result.weekday).to_string(),
            classes: result
                .classes
                .into_iter()
                .map(Self::today_class_to_dto)
                .collect(),
        }
    }

    pub fn schedule_date_to_dto(result: ScheduleDateResult) -> ScheduleDateResponse {
        ScheduleDateResponse {
            schedule_id: result.schedule_id,
            week_offset: result.week_offset,
            date: result.date,
            weekday: weekday_name(result.weekday).to_string(),
        }
    }
}
