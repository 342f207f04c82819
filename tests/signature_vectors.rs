use walletone_kit::{
    config::MerchantConfig,
    payment::{DescriptionEncoding, Payment},
    signature::{sign, verify},
    types::{CurrencyId, Record},
};

const MERCHANT_ID: &str = "119175088534";
const SECRET: &str = "XkZMYW56NzVbNV1aekxGNVxvT3xwVHExZ005";

fn reference_payment() -> Payment {
    let config = MerchantConfig::builder()
        .merchant_id(MERCHANT_ID)
        .secret_key(SECRET)
        .build();

    Payment::builder(config)
        .amount(100u32)
        .currency_id(CurrencyId(643))
        .payment_id("12345-001")
        .description("Payment for order #12345-001 in MYSHOP.com")
        .expired_date("2019-12-31T23:59:59")
        .success_url("https://myshop.com/w1/success.php")
        .fail_url("https://myshop.com/w1/fail.php")
        .custom_fields(Record::from([
            ("MyShopParam1".to_string(), "Value1".to_string()),
            ("MyShopParam2".to_string(), "Value2".to_string()),
            ("MyShopParam3".to_string(), "Value3".to_string()),
        ]))
        .build()
}

#[test]
fn test_reference_signature() {
    let payment = reference_payment();
    let signature = payment.sign().unwrap().unwrap();
    assert_eq!(signature.as_str(), "7qnRb5mi+2viZbYS3wKlhQ==");
}

#[test]
fn test_reference_form_carries_signature() {
    let payment = reference_payment();
    let form = payment.form_fields().unwrap();
    let lookup = |name: &str| {
        form.iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    };

    assert_eq!(lookup("WMI_PAYMENT_AMOUNT"), Some("100.00"));
    assert_eq!(
        lookup("WMI_DESCRIPTION"),
        Some("BASE64:UGF5bWVudCBmb3Igb3JkZXIgIzEyMzQ1LTAwMSBpbiBNWVNIT1AuY29t")
    );
    assert_eq!(lookup("WMI_SIGNATURE"), Some("7qnRb5mi+2viZbYS3wKlhQ=="));
}

#[test]
fn test_plain_description_changes_signature() {
    let mut payment = reference_payment();
    payment.set_description_encoding(DescriptionEncoding::Plain);
    let signature = payment.sign().unwrap().unwrap();
    assert_eq!(signature.as_str(), "uHrvtpmmUMgs0ezU3jCEGQ==");
}

#[test]
fn test_insertion_order_does_not_matter() {
    let payment = reference_payment();
    let fields = payment.outbound_fields();

    let mut pairs: Vec<(String, String)> = fields.clone().into_iter().collect();
    pairs.sort();
    let forward: Record<String> = pairs.iter().cloned().collect();
    let backward: Record<String> = pairs.iter().rev().cloned().collect();

    let expected = sign(&fields, SECRET).unwrap();
    assert_eq!(sign(&forward, SECRET).unwrap(), expected);
    assert_eq!(sign(&backward, SECRET).unwrap(), expected);
}

#[test]
fn test_sign_verify_round_trip_over_varied_sets() {
    let sets: Vec<Record<String>> = vec![
        Record::new(),
        Record::from([("WMI_MERCHANT_ID".to_string(), MERCHANT_ID.to_string())]),
        Record::from([
            ("wmi_lower".to_string(), "Оплата".to_string()),
            ("WMI_UPPER".to_string(), "№ 1".to_string()),
            ("Custom".to_string(), String::new()),
        ]),
        reference_payment().outbound_fields(),
    ];

    for fields in &sets {
        let token = sign(fields, SECRET).unwrap();
        assert!(verify(fields, SECRET, token.as_str()).unwrap());
        assert!(!verify(fields, "other", token.as_str()).unwrap());
    }
}

#[test]
fn test_every_field_is_covered_by_signature() {
    let payment = reference_payment();
    let fields = payment.outbound_fields();
    let token = sign(&fields, SECRET).unwrap();

    for name in fields.keys() {
        let mut tampered = fields.clone();
        tampered.insert(name.clone(), format!("{}x", fields[name]));
        assert!(
            !verify(&tampered, SECRET, token.as_str()).unwrap(),
            "changing {name} must invalidate the signature"
        );
    }
}

#[test]
fn test_unsigned_payment_has_no_signature() {
    let config = MerchantConfig::builder().merchant_id(MERCHANT_ID).build();
    let payment = Payment::builder(config).amount(10u32).build();
    assert_eq!(payment.sign().unwrap(), None);
}
