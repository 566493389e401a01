use super::*;

fn filled() -> CustomerForm {
    CustomerForm {
        last_name: " Ivanova ".to_owned(),
        first_name: "Maria".to_owned(),
        middle_name: "  ".to_owned(),
        phone_number: "+7 900 000".to_owned(),
        male: false,
        birth_date: "1995-04-02".to_owned(),
    }
}

#[test]
fn validate_new_customer_trims_and_drops_blank_middle_name() {
    let customer = validate_new_customer(&filled()).expect("valid form");
    assert_eq!(customer.last_name, "Ivanova");
    assert_eq!(customer.middle_name, None);
    assert!(!customer.gender);
}

#[test]
fn validate_new_customer_keeps_middle_name() {
    let form = CustomerForm { middle_name: "Petrovna".to_owned(), ..filled() };
    assert_eq!(validate_new_customer(&form).map(|c| c.middle_name), Ok(Some("Petrovna".to_owned())));
}

#[test]
fn validate_new_customer_reports_first_missing_field() {
    let no_name = CustomerForm { first_name: String::new(), ..filled() };
    assert_eq!(validate_new_customer(&no_name), Err("Enter last and first name."));

    let no_phone = CustomerForm { phone_number: " ".to_owned(), ..filled() };
    assert_eq!(validate_new_customer(&no_phone), Err("Enter a phone number."));

    let no_birth = CustomerForm { birth_date: String::new(), ..filled() };
    assert_eq!(validate_new_customer(&no_birth), Err("Enter a birth date."));
}

#[test]
fn gender_label_maps_flag() {
    assert_eq!(gender_label(true), "M");
    assert_eq!(gender_label(false), "F");
}

#[test]
fn form_from_then_validate_preserves_record() {
    let record = Customer {
        id: 12,
        last_name: "Petrov".to_owned(),
        first_name: "Ivan".to_owned(),
        middle_name: Some("Sergeevich".to_owned()),
        phone_number: "+7 901".to_owned(),
        gender: true,
        birth_date: "1988-11-30".to_owned(),
    };
    let form = form_from(&record);
    assert!(form.male);
    assert_eq!(form.middle_name, "Sergeevich");

    let fields = validate_new_customer(&form).expect("valid form");
    assert_eq!(edited_customer(record.id, fields), record);
}

#[test]
fn edited_customer_keeps_id_and_cleared_middle_name() {
    let fields = validate_new_customer(&filled()).expect("valid form");
    let customer = edited_customer(5, fields);
    assert_eq!(customer.id, 5);
    assert_eq!(customer.middle_name, None);
    assert_eq!(customer.last_name, "Ivanova");
}
