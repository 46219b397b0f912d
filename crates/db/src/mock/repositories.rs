use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use clinicbook_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, NewAppointment},
        doctor::{Doctor, NewDoctor, NewSpecialization, Specialization},
        slot::{Slot, SlotKey},
    },
    store::{
        AppointmentScope, AppointmentStore, BookingOutcome, CancelOutcome, DoctorStore, SlotStore,
    },
};
use mockall::mock;
use uuid::Uuid;

mock! {
    pub SlotRepo {}

    #[async_trait]
    impl SlotStore for SlotRepo {
        async fn persist_slots(&self, doctor_id: i64, slots: &[Slot]) -> BookingResult<()>;

        async fn list_slots_from(
            &self,
            doctor_id: i64,
            from: NaiveDate,
        ) -> BookingResult<Vec<Slot>>;

        async fn find_slot(&self, key: SlotKey) -> BookingResult<Option<Slot>>;
    }
}

mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn book_slot(
            &self,
            id: Uuid,
            booking: NewAppointment,
        ) -> BookingResult<BookingOutcome>;

        async fn cancel_appointment(&self, id: Uuid) -> BookingResult<CancelOutcome>;

        async fn get_appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

        async fn set_rating(&self, id: Uuid, rating: f64) -> BookingResult<bool>;

        async fn complete_overdue(
            &self,
            scope: AppointmentScope,
            now: NaiveDateTime,
        ) -> BookingResult<u64>;

        async fn list_appointments(
            &self,
            scope: AppointmentScope,
        ) -> BookingResult<Vec<Appointment>>;
    }
}

mock! {
    pub DoctorRepo {}

    #[async_trait]
    impl DoctorStore for DoctorRepo {
        async fn get_doctor(&self, id: i64) -> BookingResult<Option<Doctor>>;

        async fn get_specialization(&self, id: i64) -> BookingResult<Option<Specialization>>;

        async fn list_doctors_for_specialization(
            &self,
            specialization_id: i64,
        ) -> BookingResult<Vec<Doctor>>;

        async fn doctor_ids_for_specialization(
            &self,
            specialization_id: i64,
        ) -> BookingResult<Vec<i64>>;

        async fn average_rating(&self, doctor_id: i64) -> BookingResult<Option<f64>>;

        async fn set_doctor_rating(&self, doctor_id: i64, rating: f64) -> BookingResult<()>;

        async fn list_specializations(&self) -> BookingResult<Vec<Specialization>>;

        async fn create_specialization(
            &self,
            specialization: NewSpecialization,
        ) -> BookingResult<Specialization>;

        async fn delete_specialization(&self, id: i64) -> BookingResult<bool>;

        async fn create_doctor(&self, doctor: NewDoctor) -> BookingResult<Option<Doctor>>;

        async fn delete_doctor(&self, id: i64) -> BookingResult<bool>;
    }
}
